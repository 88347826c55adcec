//! Application layer: form state, list editing, and playbook output.

pub mod context;
pub mod emitter;
pub mod form;
pub mod playbook;
pub mod tid_list;

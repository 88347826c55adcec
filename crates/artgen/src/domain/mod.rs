//! Domain types for the playbook form and its failures.

pub mod errors;
pub mod model;

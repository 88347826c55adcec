use artgen::app::emitter;
use artgen::app::form::FormState;
use artgen::app::playbook::PlaybookOptions;
use artgen::domain::model::{HostChoice, OsChoice};
use insta::assert_snapshot;

#[test]
fn windows_playbook_renders() {
    let mut state = FormState::default();
    state.os = OsChoice::Windows;
    state.hosts = HostChoice::Workstations;
    state.description = "Lab run\nnightly".into();
    state.identifiers.add("T1059.001");
    state.identifiers.add("T1105");

    let options = PlaybookOptions {
        become_expression: String::new(),
        ..PlaybookOptions::default()
    };
    let rendered = emitter::render(&state, &options).expect("render playbook");
    assert_snapshot!("windows_playbook", rendered);
}

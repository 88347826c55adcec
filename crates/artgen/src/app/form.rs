//! Form state and the main/list-editor window state machine.

use tracing::debug;

use crate::app::tid_list::TidList;
use crate::domain::model::{HostChoice, OsChoice};
use crate::infra::config::Config;

/// Everything the user has entered during the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub filename: String,
    pub os: OsChoice,
    pub hosts: HostChoice,
    pub description: String,
    pub identifiers: TidList,
    pub list_editor_open: bool,
}

impl FormState {
    /// Seed the selectors from configuration. The filename starts empty.
    pub fn from_config(config: &Config) -> Self {
        Self {
            filename: String::new(),
            os: config.defaults.os(),
            hosts: config.defaults.hosts(),
            description: String::new(),
            identifiers: TidList::with_trim(config.editor.trim_entries()),
            list_editor_open: false,
        }
    }
}

/// Which windows are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    MainWindowOnly,
    MainWindowPlusListEditor,
}

/// Owns the form state and drives the list-editor window transitions.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new(state: FormState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn window_state(&self) -> WindowState {
        if self.state.list_editor_open {
            WindowState::MainWindowPlusListEditor
        } else {
            WindowState::MainWindowOnly
        }
    }

    /// Apply the "ART Test" checkbox value. Closing the editor keeps the list intact.
    pub fn set_list_editor(&mut self, checked: bool) -> WindowState {
        if self.state.list_editor_open != checked {
            self.state.list_editor_open = checked;
            debug!(state = ?self.window_state(), "list editor toggled");
        }
        self.window_state()
    }

    pub fn toggle_list_editor(&mut self) -> WindowState {
        let checked = !self.state.list_editor_open;
        self.set_list_editor(checked)
    }

    pub fn identifiers(&self) -> &TidList {
        &self.state.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut TidList {
        &mut self.state.identifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_main_window_only() {
        let controller = FormController::new(FormState::from_config(&Config::default()));
        assert_eq!(controller.window_state(), WindowState::MainWindowOnly);
        assert!(controller.state().filename.is_empty());
        assert_eq!(controller.state().os, OsChoice::Linux);
        assert_eq!(controller.state().hosts, HostChoice::All);
    }

    #[test]
    fn checkbox_moves_between_states() {
        let mut controller = FormController::default();
        assert_eq!(
            controller.set_list_editor(true),
            WindowState::MainWindowPlusListEditor
        );
        assert_eq!(
            controller.set_list_editor(true),
            WindowState::MainWindowPlusListEditor
        );
        assert_eq!(controller.toggle_list_editor(), WindowState::MainWindowOnly);
    }

    #[test]
    fn toggling_editor_off_and_on_preserves_identifiers() {
        let mut controller = FormController::default();
        controller.set_list_editor(true);
        controller.identifiers_mut().add("T1059.001");
        controller.identifiers_mut().add("T1105");
        let before = controller.identifiers().clone();

        controller.set_list_editor(false);
        assert_eq!(controller.identifiers(), &before);
        controller.set_list_editor(true);
        assert_eq!(controller.identifiers(), &before);
    }
}

//! Session-wide application context handed to the UI.

use crate::app::emitter::{self, GenerateOutcome};
use crate::app::form::{FormController, FormState};
use crate::app::playbook::PlaybookOptions;
use crate::domain::errors::GenerateError;
use crate::infra::config::Config;

/// Owns the configuration and the single form session.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Config,
    options: PlaybookOptions,
    form: FormController,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let options = PlaybookOptions::from_config(&config);
        let form = FormController::new(FormState::from_config(&config));
        Self {
            config,
            options,
            form,
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// Placeholder text for the filename field.
    pub fn filename_placeholder(&self) -> &str {
        self.config.defaults.output_file()
    }

    /// Current document as it would be written, for the preview pane.
    pub fn preview(&self) -> Result<String, GenerateError> {
        emitter::render(self.form.state(), &self.options)
    }

    pub fn generate(&self) -> Result<GenerateOutcome, GenerateError> {
        emitter::generate(self.form.state(), &self.options)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

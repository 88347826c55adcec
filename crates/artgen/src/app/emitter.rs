//! Playbook rendering and file output.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::app::form::FormState;
use crate::app::playbook::{Playbook, PlaybookOptions};
use crate::domain::errors::GenerateError;

const DOCUMENT_START: &str = "---\n";

/// Result of a successful generate action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Render the document start marker, the description comment, and the playbook.
pub fn render(state: &FormState, options: &PlaybookOptions) -> Result<String, GenerateError> {
    let playbook = Playbook::from_form(state, options);
    let body = serde_yaml::to_string(&playbook)?;

    let mut rendered = String::with_capacity(DOCUMENT_START.len() + body.len());
    rendered.push_str(DOCUMENT_START);
    if let Some(header) = comment_header(&state.description) {
        rendered.push_str(&header);
    }
    rendered.push_str(&body);
    Ok(rendered)
}

/// Render the playbook and write it to `state.filename`, truncating any existing file.
pub fn generate(
    state: &FormState,
    options: &PlaybookOptions,
) -> Result<GenerateOutcome, GenerateError> {
    let path = PathBuf::from(&state.filename);
    let result = render(state, options).and_then(|rendered| {
        write_document(&path, rendered.as_bytes())?;
        Ok(rendered.len())
    });

    match result {
        Ok(bytes) => {
            info!(path = %path.display(), bytes, tids = state.identifiers.len(), "generated playbook");
            Ok(GenerateOutcome { path, bytes })
        }
        Err(err) => {
            error!(%err, "generate failed");
            Err(err)
        }
    }
}

fn write_document(path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    let to_error = |source| GenerateError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(to_error)?;
    file.write_all(contents).map_err(to_error)?;
    file.flush().map_err(to_error)
}

fn comment_header(description: &str) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    Some(format!("# {}\n", description.replace('\n', "\n# ")))
}

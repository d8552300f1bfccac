use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to start editor `{editor}`: {source}")]
    Spawn {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("editor `{editor}` exited with {status}")]
    Exit { editor: String, status: ExitStatus },
}

/// Runs the editor in the foreground with the file as its only argument.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<(), EditorError> {
    tracing::info!(editor, path = %path.display(), "opening editor");
    let status = Command::new(editor)
        .arg(path)
        .status()
        .map_err(|source| EditorError::Spawn {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::Exit {
            editor: editor.to_string(),
            status,
        });
    }
    Ok(())
}

//! Writing generated files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::GeneratorError;

/// Writes content to a file atomically.
///
/// The content goes to a sibling temp file which is then renamed over the
/// target, so readers never observe a partially written file. Missing parent
/// directories are created.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GeneratorError::WriteError {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

// `openapi.json` -> `openapi.json.tmp`, so outputs sharing a stem never
// share a temp file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

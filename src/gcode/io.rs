//! G-code file I/O
//!
//! Files are read and written whole; no handle outlives the call.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{PaError, Result};
use crate::gcode::extract::{extract, HeightIndex, SourceDocument};

/// Read a G-code file and extract its layer heights.
///
/// # Errors
/// * `FileNotFound` - `path` does not exist
/// * `FileReadError` - the file could not be read as UTF-8 text
pub fn read_document(path: &Path) -> Result<(SourceDocument, HeightIndex)> {
    if !path.exists() {
        return Err(PaError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| PaError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let (document, heights) = extract(&text);
    info!(
        "Loaded {}: {} lines, {} layer heights",
        path.display(),
        document.len(),
        heights.len()
    );

    Ok((document, heights))
}

/// Write lines joined by `\n`, without a trailing newline.
pub fn write_document(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, lines.join("\n")).map_err(|source| PaError::FileWriteError {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

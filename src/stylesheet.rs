//! Sass compilation for the site stylesheet.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Stylesheet not found: {0}")]
    Missing(PathBuf),
    #[error("Failed to compile {path}: {message}")]
    Compile { path: PathBuf, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compile the Sass file at `input` and write the CSS to `output`.
pub fn compile_stylesheet(input: &Path, output: &Path) -> Result<(), StylesheetError> {
    if !input.is_file() {
        return Err(StylesheetError::Missing(input.to_path_buf()));
    }

    let css = grass::from_path(input, &grass::Options::default()).map_err(|e| {
        StylesheetError::Compile {
            path: input.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, css)?;
    log::debug!("Compiled {} -> {}", input.display(), output.display());
    Ok(())
}

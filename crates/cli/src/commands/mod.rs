//! Subcommand implementations.

pub mod cost;
pub mod label;
pub mod material;
pub mod price;
pub mod scale;
pub mod stock;
pub mod suggest;

use std::path::{Path, PathBuf};

use formulary_core::Workbook;
use thiserror::Error;

/// Errors reading or writing workbook files.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("Cannot read workbook {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid workbook {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Cannot write workbook {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot serialize workbook: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Load a YAML workbook.
///
/// # Errors
///
/// Returns `WorkbookError` if the file cannot be read or parsed.
pub fn load_workbook(path: &Path) -> Result<Workbook, WorkbookError> {
    let content = std::fs::read_to_string(path).map_err(|source| WorkbookError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let workbook: Workbook = serde_yaml::from_str(&content).map_err(|source| WorkbookError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        materials = workbook.materials.len(),
        lines = workbook.recipe.lines.len(),
        "Loaded workbook"
    );
    Ok(workbook)
}

/// Write a workbook as YAML.
///
/// # Errors
///
/// Returns `WorkbookError` if serialization or the write fails.
pub fn save_workbook(path: &Path, workbook: &Workbook) -> Result<(), WorkbookError> {
    let content = serde_yaml::to_string(workbook)?;
    std::fs::write(path, content).map_err(|source| WorkbookError::Write {
        path: path.to_path_buf(),
        source,
    })
}

use std::path::PathBuf;

use thiserror::Error;

/// The source file could not be turned into rows: missing, unreadable,
/// unsupported format or absent sheet.
#[derive(Debug, Error)]
#[error("cannot read data source {}: {reason}", .path.display())]
pub struct DataSourceError {
    pub path: PathBuf,
    pub reason: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DataSourceError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DataSourceError {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Wrap a contextual reader error, keeping its chain in `reason`.
    pub fn from_anyhow(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        DataSourceError {
            path: path.into(),
            reason: format!("{err:#}"),
            source: Some(err.into()),
        }
    }
}

/// A required column is absent after header normalization.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing column '{column}' (found: {})", .found.join(", "))]
pub struct SchemaError {
    pub column: String,
    pub found: Vec<String>,
}

/// Anything that can go wrong while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

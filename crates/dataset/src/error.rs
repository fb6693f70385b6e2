use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open order dataset at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in order dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Order dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: could not parse purchase timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Row {row}: could not parse price '{value}'")]
    InvalidPrice { row: usize, value: String },
}

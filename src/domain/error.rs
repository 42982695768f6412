// Chart core errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot read date value '{0}'")]
    InvalidDate(String),

    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    DatasetFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

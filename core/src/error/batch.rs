use thiserror::Error;

/// Caller configuration mistakes in cost estimation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("unknown model '{0}' (expected one of: economy, premium)")]
    UnknownModel(String),

    #[error("projected token count does not fit in 64 bits")]
    TokenOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("cannot summarize an empty batch")]
    EmptyBatch,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    TaskNotFound(String),
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid template: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("template entry {index} is missing '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("unknown preset '{name}' (available: {available})")]
    UnknownPreset { name: String, available: String },
}

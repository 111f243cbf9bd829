use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("dataset '{dataset}': retrieval failed: {message}")]
    Source { dataset: String, message: String },

    #[error("dataset '{dataset}': label '{label}' is outside the rule's domain")]
    UnmappedLabel { dataset: String, label: String },

    #[error("dataset '{dataset}': missing column '{column}'")]
    MissingColumn { dataset: String, column: String },

    #[error("dataset '{dataset}': malformed record: {message}")]
    Malformed { dataset: String, message: String },

    #[error("dataset '{dataset}': storage failed: {message}")]
    Storage { dataset: String, message: String },

    #[error("unknown dataset: {0}")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;

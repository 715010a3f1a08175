use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextcueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Input contains no caption text: {0}")]
    EmptyInput(String),

    #[error("Input is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Output file already exists: {0}")]
    OutputExists(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Batch task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, TextcueError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AigError>;

#[derive(Error, Debug)]
pub enum AigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git log failed ({status}): {stderr}")]
    GitLog { status: String, stderr: String },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

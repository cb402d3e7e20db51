use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse report: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid report structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not reach the specified URL")]
    Unreachable,

    #[error("Failed to load URL: {0}")]
    Navigation(String),

    #[error("Page load timed out after {0} ms")]
    NavigationTimeout(u64),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Analysis of {url} failed: {source}")]
    Session {
        url: String,
        #[source]
        source: peregrine_browser::Error,
    },

    #[error("Analysis of {url} exceeded the {limit_secs} s deadline")]
    Deadline { url: String, limit_secs: u64 },

    #[error("Analysis of {url} failed unexpectedly: {reason}")]
    Unexpected { url: String, reason: String },
}

impl Error {
    /// True when the target host could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Error::Session {
                source: peregrine_browser::Error::Unreachable,
                ..
            }
        )
    }

    /// True when a time limit ended the analysis, whether the page-load
    /// timeout or the overall deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Deadline { .. })
            || matches!(
                self,
                Error::Session {
                    source: peregrine_browser::Error::NavigationTimeout(_),
                    ..
                }
            )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

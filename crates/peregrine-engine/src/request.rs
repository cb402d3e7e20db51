use crate::{Error, Result};
use url::Url;

/// A validated analysis target. Construction is the only place URLs are
/// checked, so everything past this type can assume an absolute http(s)
/// URL.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    url: Url,
}

impl AnalysisRequest {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| Error::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            scheme => Err(Error::InvalidUrl {
                url: input.to_string(),
                reason: format!("unsupported scheme '{}'", scheme),
            }),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

use crate::analyzer::UrlAnalyzer;
use crate::request::AnalysisRequest;
use crate::{Error, Result};
use peregrine_core::report::AnalysisReport;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shares one analyzer across tasks while capping how many browsers are
/// alive at once.
pub struct AnalysisPool<A> {
    analyzer: Arc<A>,
    semaphore: Arc<Semaphore>,
}

impl<A> Clone for AnalysisPool<A> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            semaphore: Arc::clone(&self.semaphore),
        }
    }
}

impl<A: UrlAnalyzer> AnalysisPool<A> {
    pub fn new(analyzer: A, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        tracing::debug!("Analysis pool ready with concurrency {}", concurrency);

        Self {
            analyzer: Arc::new(analyzer),
            semaphore: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Run one analysis once a slot frees up. The permit spans the whole
    /// analysis, browser teardown included, so the cap bounds live
    /// Chrome processes.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        let _permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Error::Unexpected {
                url: request.as_str().to_string(),
                reason: format!("concurrency limiter closed: {}", e),
            })?;

        self.analyzer.analyze(&request).await
    }
}

pub mod analyzer;
pub mod error;
pub mod pool;
pub mod request;
pub mod session;

pub use analyzer::{AnalyzerConfig, PageAnalyzer, UrlAnalyzer, build_report};
pub use error::{Error, Result};
pub use pool::AnalysisPool;
pub use request::AnalysisRequest;
pub use session::collect_with_teardown;

pub mod error;
pub mod metrics;
pub mod report;
pub mod resource;
pub mod suggestion;
pub mod telemetry;

pub use error::{Error, Result};

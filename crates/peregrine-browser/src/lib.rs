pub mod chrome_finder;
pub mod collector;
pub mod error;
pub mod session;

pub use chrome_finder::ChromeFinder;
pub use collector::TelemetryCollector;
pub use error::{Error, Result};
pub use session::{ChromeSession, DEFAULT_USER_AGENT, SessionConfig};

use flexi_logger::{LogSpecBuilder, LogSpecification};
use log::{LevelFilter, warn};

mod views;

pub mod app;

pub use app::{App, Message};

/// Parse a flexi_logger spec such as `"info"` or `"warn, cssclock_core=debug"`.
///
/// `RUST_LOG` takes precedence when set. An unparsable spec falls back to
/// warnings only.
pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        warn!("Failed to parse log level {log_level:?}: {err}");
        LogSpecBuilder::new().default(LevelFilter::Warn).build()
    })
}

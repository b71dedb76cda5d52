//! Logging utilities and the injectable collision log sink

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Later calls are no-ops once a logger is installed.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Log target used for every message the collision system emits
pub const LOG_TARGET: &str = "shape_collision";

/// Sink for the warnings and errors raised by malformed input
///
/// The collision system receives one at construction instead of writing to a
/// process-wide logger directly, so tests can observe what was reported.
/// Reporting is fire-and-forget and never changes the result of a call.
pub trait CollisionLog: Send + Sync {
    /// Report a malformed-input error
    fn error(&self, message: &str);

    /// Report a recoverable oddity in the input
    fn warning(&self, message: &str);
}

/// Default sink forwarding to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl CollisionLog for LogFacade {
    fn error(&self, message: &str) {
        error!(target: LOG_TARGET, "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: LOG_TARGET, "{message}");
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_keeps_first_logger() {
        init();
        init();

        LogFacade.warning("logged after init");
        assert!(log::max_level() >= log::LevelFilter::Error);
    }
}

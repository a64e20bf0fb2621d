use std::time::Duration;
use tracing::info;

/// Blocks the caller until a sun event is due.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
    fn name(&self) -> &str;
}

/// Sleeps the current thread for the whole interval in one go.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn name(&self) -> &str {
        "Thread"
    }
}

/// Logs the interval and returns immediately.
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep(&mut self, duration: Duration) {
        info!("Dry run: would sleep {:.0}s", duration.as_secs_f64());
    }

    fn name(&self) -> &str {
        "Dry run"
    }
}

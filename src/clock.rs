//! Elapsed-time clock driven by a background ticker.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Seconds spent in the current game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    elapsed: u64,
}

impl GameClock {
    /// Creates a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one second, but only while the game is running.
    pub fn tick(&mut self, running: bool) {
        if running {
            self.elapsed += 1;
        }
    }

    /// Back to zero.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Elapsed seconds.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_hms(self.elapsed)
    }
}

/// Formats seconds as zero-padded `HH:MM:SS`. Hours keep growing past 99.
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Spawns a task that sends `()` every `period` until the receiver is dropped.
#[instrument]
pub fn spawn_ticker(period: Duration) -> (mpsc::UnboundedReceiver<()>, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(()).is_err() {
                debug!("Tick receiver dropped, stopping ticker");
                break;
            }
        }
    });
    (rx, handle)
}

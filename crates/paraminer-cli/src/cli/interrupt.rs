//! Ctrl-C handling: the first press cancels the in-flight domain; a second
//! press within [`FORCE_EXIT_WINDOW`] exits immediately.

use paraminer_core::cancel::CancelToken;
use std::time::{Duration, Instant};

pub const FORCE_EXIT_WINDOW: Duration = Duration::from_secs(2);

/// Exit status for a forced exit (128 + SIGINT).
pub const FORCE_EXIT_CODE: i32 = 130;

/// Tracks presses; returns true when the process should exit now.
#[derive(Debug, Default)]
pub struct PressTracker {
    last: Option<Instant>,
}

impl PressTracker {
    pub fn press(&mut self, now: Instant) -> bool {
        let force = self
            .last
            .is_some_and(|prev| now.duration_since(prev) <= FORCE_EXIT_WINDOW);
        self.last = Some(now);
        force
    }
}

/// Spawns the Ctrl-C listener. The task lives until the runtime shuts down.
pub fn spawn_listener(cancel: CancelToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut presses = PressTracker::default();
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("cannot listen for Ctrl-C: {}", e);
                return;
            }
            if presses.press(Instant::now()) {
                eprintln!("\nInterrupted twice, exiting.");
                std::process::exit(FORCE_EXIT_CODE);
            }
            tracing::warn!(
                "Interrupted by user (press Ctrl-C again within {}s to exit)",
                FORCE_EXIT_WINDOW.as_secs()
            );
            cancel.cancel();
        }
    })
}

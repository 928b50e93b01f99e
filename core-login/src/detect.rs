//! Closed-window detection for external login flows.
//!
//! An external login window belongs to another origin, so the only signal
//! the widget ever gets out of it is whether it still exists. The detector
//! polls that one bit and resolves a [`FlowCompletion`] the first time the
//! window reads as closed.

use bridge_traits::ExternalWindow;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Interval between closed-state probes when none is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Polls an external window until it closes.
pub struct CompletionDetector {
    poll_interval: Duration,
}

impl CompletionDetector {
    /// Creates a detector with the default poll interval.
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the interval between closed-state probes.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Starts polling `window` and returns a handle resolving when it closes.
    ///
    /// A missing window counts as already closed: the handle resolves on
    /// the first tick, the same as a popup the user dismissed before the
    /// first probe. Probe errors are treated as "still open" and retried
    /// on the next tick.
    ///
    /// Dropping the returned [`FlowCompletion`] cancels the poll.
    pub fn await_closed(&self, window: Option<Box<dyn ExternalWindow>>) -> FlowCompletion {
        let (done_tx, done_rx) = oneshot::channel();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let period = self.poll_interval;

        tokio::spawn(async move {
            // First probe happens one full period after the window opened
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        debug!("Window poll cancelled");
                        return;
                    }
                    _ = ticker.tick() => {
                        if window_closed(window.as_deref()) {
                            break;
                        }
                    }
                }
            }

            debug!("External window closed, poll finished");
            let _ = done_tx.send(());
        });

        FlowCompletion {
            done: done_rx,
            cancel: Some(cancel_tx),
        }
    }
}

impl Default for CompletionDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn window_closed(window: Option<&dyn ExternalWindow>) -> bool {
    match window {
        None => true,
        Some(window) => match window.is_closed() {
            Ok(closed) => closed,
            Err(e) => {
                debug!("Window probe failed, retrying next tick: {}", e);
                false
            }
        },
    }
}

/// Pending completion signal of one external login flow.
///
/// Resolves at most once. Dropping the handle stops the underlying poll.
pub struct FlowCompletion {
    done: oneshot::Receiver<()>,
    cancel: Option<oneshot::Sender<()>>,
}

impl FlowCompletion {
    /// Waits until the window closes.
    ///
    /// A poll task that went away also counts as completion; the caller
    /// must never hang on a window nobody is watching anymore.
    pub async fn wait(mut self) {
        let _ = (&mut self.done).await;
    }
}

impl Drop for FlowCompletion {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

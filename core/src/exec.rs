//! Execution mode for adapter subscriptions.

use std::thread;

/// Where a subscription executes its round trip.
///
/// The choice affects scheduling only; the terminal-signal contract is
/// identical in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Execute on the subscribing thread; `subscribe` returns after the
    /// terminal signal has been delivered.
    #[default]
    Synchronous,

    /// Execute on a dedicated thread; `subscribe` returns immediately and
    /// the terminal signal is delivered from that thread.
    Enqueued,
}

impl ExecutionMode {
    /// Run `task` according to the mode.
    pub(crate) fn dispatch<F>(self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            ExecutionMode::Synchronous => task(),
            ExecutionMode::Enqueued => {
                thread::spawn(task);
            }
        }
    }
}

//! Cooperative cancellation for per-granularity analysis passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something a running analysis can poll to learn it should stop.
///
/// Checked at granularity boundaries only; a pass that has started
/// aggregating finishes its pass before the flag is observed.
pub trait Cancellable: Send + Sync {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);
}

/// Shared flag; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that never fires, for callers that do not cancel.
    pub fn never() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

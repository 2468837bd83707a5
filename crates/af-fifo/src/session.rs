//! # Session — The Shared `start` Control
//!
//! While the session is inactive, each domain reinitializes its own
//! positions and relay stages on every tick it takes. Stopping and then
//! restarting the session is the supported way to reset both sides
//! together.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::fifo::Shared;

/// Cloneable handle over the session `start` flag.
#[derive(Clone)]
pub struct SessionControl {
    shared: Arc<Shared>,
}

impl SessionControl {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Activate the session. Domains resume transferring on their next tick.
    pub fn start(&self) {
        if !self.shared.active.swap(true, Ordering::AcqRel) {
            tracing::debug!("session started");
        }
    }

    /// Deactivate the session. Each domain resets itself on its next tick.
    pub fn stop(&self) {
        if self.shared.active.swap(false, Ordering::AcqRel) {
            tracing::debug!("session stopped");
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.shared.is_active()
    }
}

//! # Fifo — Construction and the Shared Core
//!
//! [`AsyncFifo`] owns the storage and the two published Gray positions
//! until it is split into a [`Producer`] and a [`Consumer`]. Each half is
//! then moved into its own domain (thread, task, or simulated clock).
//!
//! ```
//! use af_core::FifoConfig;
//! use af_fifo::AsyncFifo;
//!
//! let fifo = AsyncFifo::new(FifoConfig::with_capacity(32, 4).unwrap());
//! let (mut tx, mut rx) = fifo.split();
//!
//! assert!(tx.try_push(7));
//! // The write position needs two consumer ticks to cross the relay.
//! rx.tick();
//! rx.tick();
//! assert_eq!(rx.try_pop(), Some(7));
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use af_core::{ConfigError, FifoConfig, PointerSpace};
use crossbeam_utils::CachePadded;

use crate::consumer::Consumer;
use crate::producer::Producer;
use crate::session::SessionControl;
use crate::storage::Storage;

/// State visible to both domains.
///
/// Each published position has exactly one writer: `write_gray` belongs to
/// the producer, `read_gray` to the consumer. Publication is a single
/// `Release` store of a whole Gray value, so a peer always observes either
/// the value before an update or the value after it.
pub(crate) struct Shared {
    pub(crate) storage: Storage,

    pub(crate) write_gray: CachePadded<AtomicU32>,

    pub(crate) read_gray: CachePadded<AtomicU32>,

    /// Session `start` control.
    pub(crate) active: AtomicBool,

    pub(crate) config: FifoConfig,
}

impl Shared {
    #[inline]
    pub(crate) fn space(&self) -> PointerSpace {
        self.config.pointer_space()
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// A dual-clock FIFO that has not yet been split into its two domains.
pub struct AsyncFifo {
    shared: Arc<Shared>,
}

impl AsyncFifo {
    /// Allocate storage for a validated geometry. The session starts active.
    pub fn new(config: FifoConfig) -> Self {
        let shared = Shared {
            storage: Storage::new(config.capacity()),
            write_gray: CachePadded::new(AtomicU32::new(0)),
            read_gray: CachePadded::new(AtomicU32::new(0)),
            active: AtomicBool::new(true),
            config,
        };
        tracing::debug!(
            word_width = config.word_width(),
            capacity = config.capacity(),
            "fifo allocated"
        );
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Validate `(word_width, address_width)` and allocate.
    pub fn with_geometry(word_width: u32, address_width: u32) -> Result<Self, ConfigError> {
        Ok(Self::new(FifoConfig::new(word_width, address_width)?))
    }

    #[inline]
    pub fn config(&self) -> FifoConfig {
        self.shared.config
    }

    /// Number of slots actually allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.storage.len()
    }

    /// Handle over the session `start` control; may be taken before or
    /// after splitting.
    pub fn session(&self) -> SessionControl {
        SessionControl::new(Arc::clone(&self.shared))
    }

    /// Hand out the producer and consumer halves.
    pub fn split(self) -> (Producer, Consumer) {
        let producer = Producer::new(Arc::clone(&self.shared));
        let consumer = Consumer::new(self.shared);
        (producer, consumer)
    }
}

/// Validate a geometry and split it straight away.
pub fn channel(word_width: u32, address_width: u32) -> Result<(Producer, Consumer), ConfigError> {
    Ok(AsyncFifo::with_geometry(word_width, address_width)?.split())
}

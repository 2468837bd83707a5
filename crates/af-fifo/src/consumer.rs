//! # Consumer — The Read Domain
//!
//! Mirror image of the producer. Each [`Consumer::try_pop`] or
//! [`Consumer::tick`] call is one consumer tick: pop if `empty` was clear
//! going into the tick, shift the producer's published Gray position
//! through the relay, recompute the registered `empty` flag.
//!
//! Because `empty` is derived from the *settled* write position, the read
//! position can only reach words whose publication has already crossed
//! both relay stages. A word is never read before it is written.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::boundary::WordSink;
use crate::cursor::Cursor;
use crate::fifo::Shared;
use crate::relay::Relay;
use crate::session::SessionControl;
use crate::status::{Domain, DomainStatus};

/// The read half of an [`AsyncFifo`](crate::AsyncFifo).
pub struct Consumer {
    shared: Arc<Shared>,

    /// Read position and its Gray mirror.
    cursor: Cursor,

    /// Imports the producer's Gray write position.
    relay: Relay,

    /// Registered empty flag.
    empty: bool,

    /// Output register: the last word handed out.
    output: u64,
}

impl Consumer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let space = shared.space();
        Self {
            shared,
            cursor: Cursor::new(space),
            relay: Relay::new(),
            empty: true,
            output: 0,
        }
    }

    /// One consumer tick carrying a pop request.
    #[inline]
    pub fn try_pop(&mut self) -> Option<u64> {
        self.step(true)
    }

    /// One consumer tick without a request; only the relay advances.
    #[inline]
    pub fn tick(&mut self) {
        self.step(false);
    }

    /// One tick feeding a downstream collaborator. Returns `true` if a word
    /// was delivered.
    pub fn drive<S: WordSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        match self.step(true) {
            Some(word) => {
                sink.accept(word);
                true
            }
            None => false,
        }
    }

    fn step(&mut self, pop: bool) -> Option<u64> {
        if !self.shared.is_active() {
            self.clear();
            return None;
        }

        let word = if pop && !self.empty {
            let slot = self.cursor.advance();
            let word = self.shared.storage.read(slot);
            self.shared
                .read_gray
                .store(self.cursor.gray(), Ordering::Release);
            self.output = word;
            Some(word)
        } else {
            if pop {
                tracing::trace!(position = self.cursor.position(), "pop refused: empty");
            }
            None
        };

        self.relay
            .shift(self.shared.write_gray.load(Ordering::Acquire));
        self.empty = self
            .shared
            .space()
            .is_empty(self.cursor.gray(), self.relay.settled());
        word
    }

    /// Reinitialize the consumer side only. The same split-reset hazard as
    /// [`Producer::reset`](crate::Producer::reset) applies.
    pub fn reset(&mut self) {
        self.clear();
        tracing::debug!("consumer domain reset");
    }

    fn clear(&mut self) {
        self.cursor.clear();
        self.shared.read_gray.store(0, Ordering::Release);
        self.relay.clear();
        self.empty = true;
        self.output = 0;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Consumer view: settled write position minus the read position.
    #[inline]
    pub fn occupancy(&self) -> u32 {
        let space = self.shared.space();
        space.occupancy(
            space.from_gray(self.relay.settled()),
            self.cursor.position(),
        )
    }

    #[inline]
    pub fn position(&self) -> u32 {
        self.cursor.position()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.config.capacity()
    }

    /// Contents of the output register; zero after reset.
    #[inline]
    pub fn output(&self) -> u64 {
        self.output
    }

    pub fn session(&self) -> SessionControl {
        SessionControl::new(Arc::clone(&self.shared))
    }

    pub fn status(&self) -> DomainStatus {
        let occupancy = self.occupancy();
        DomainStatus {
            domain: Domain::Consumer,
            position: self.cursor.position(),
            occupancy,
            full: occupancy as usize == self.capacity(),
            empty: self.empty,
        }
    }
}

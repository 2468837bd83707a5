//! # Producer — The Write Domain
//!
//! Every call to [`Producer::try_push`] or [`Producer::tick`] is one tick of
//! the producer's clock. On each tick the producer:
//!
//! 1. stores the requested word if `full` was clear going into the tick,
//!    advances its write position and publishes the new Gray position;
//! 2. shifts the consumer's published Gray position through its relay;
//! 3. recomputes the registered `full` flag from the (possibly advanced)
//!    write position and the settled relay stage.
//!
//! The contract is poll-based: a push on a full FIFO is dropped on the
//! floor and reported as `false`, the caller retries on a later tick.
//!
//! # Split reset
//!
//! [`Producer::reset`] only reinitializes the producer side. If the
//! consumer keeps running, both domains compute full/empty against stale
//! positions until the consumer is reset too and both relays have flushed
//! (two ticks each). That coordination belongs to the session protocol
//! around the FIFO; use [`SessionControl`](crate::SessionControl) to reset
//! both sides together.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::boundary::WordSource;
use crate::cursor::Cursor;
use crate::fifo::Shared;
use crate::relay::Relay;
use crate::session::SessionControl;
use crate::status::{Domain, DomainStatus};

/// The write half of an [`AsyncFifo`](crate::AsyncFifo).
pub struct Producer {
    shared: Arc<Shared>,

    /// Write position and its Gray mirror.
    cursor: Cursor,

    /// Imports the consumer's Gray read position.
    relay: Relay,

    /// Registered full flag.
    full: bool,

    /// A word pulled from a [`WordSource`] that the FIFO has not yet accepted.
    pending: Option<u64>,
}

impl Producer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let space = shared.space();
        Self {
            shared,
            cursor: Cursor::new(space),
            relay: Relay::new(),
            full: false,
            pending: None,
        }
    }

    /// One producer tick carrying a push request.
    ///
    /// Returns `true` if the word was stored. Words wider than the
    /// configured `word_width` are truncated to it.
    #[inline]
    pub fn try_push(&mut self, word: u64) -> bool {
        self.step(Some(word))
    }

    /// One producer tick without a request; only the relay advances.
    #[inline]
    pub fn tick(&mut self) {
        self.step(None);
    }

    /// One tick fed from an upstream collaborator.
    ///
    /// A word is only pulled from `source` when none is pending, the FIFO is
    /// not full and the session is active. A pulled word that the FIFO
    /// rejects stays pending and is offered again on the next call, so the
    /// source never loses data. Returns `true` if a word was stored on this
    /// tick.
    pub fn drive<S: WordSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if self.pending.is_none() && !self.full && self.shared.is_active() {
            self.pending = source.next_word();
        }
        match self.pending {
            Some(word) => {
                let stored = self.step(Some(word));
                if stored {
                    self.pending = None;
                }
                stored
            }
            None => {
                self.step(None);
                false
            }
        }
    }

    fn step(&mut self, request: Option<u64>) -> bool {
        if !self.shared.is_active() {
            self.clear();
            return false;
        }

        let stored = match request {
            Some(word) if !self.full => {
                let slot = self.cursor.advance();
                self.shared
                    .storage
                    .write(slot, word & self.shared.config.word_mask());
                self.shared
                    .write_gray
                    .store(self.cursor.gray(), Ordering::Release);
                true
            }
            Some(_) => {
                tracing::trace!(position = self.cursor.position(), "push rejected: full");
                false
            }
            None => false,
        };

        self.relay
            .shift(self.shared.read_gray.load(Ordering::Acquire));
        self.full = self
            .shared
            .space()
            .is_full(self.cursor.gray(), self.relay.settled());
        stored
    }

    /// Reinitialize the producer side only. See the module docs on split
    /// resets.
    pub fn reset(&mut self) {
        self.clear();
        tracing::debug!("producer domain reset");
    }

    fn clear(&mut self) {
        self.cursor.clear();
        self.shared.write_gray.store(0, Ordering::Release);
        self.relay.clear();
        self.full = false;
        self.pending = None;
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Producer view: write position minus the settled read position.
    #[inline]
    pub fn occupancy(&self) -> u32 {
        let space = self.shared.space();
        space.occupancy(
            self.cursor.position(),
            space.from_gray(self.relay.settled()),
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

    /// The word held back by [`drive`](Self::drive), if any.
    #[inline]
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    pub fn session(&self) -> SessionControl {
        SessionControl::new(Arc::clone(&self.shared))
    }

    pub fn status(&self) -> DomainStatus {
        let occupancy = self.occupancy();
        DomainStatus {
            domain: Domain::Producer,
            position: self.cursor.position(),
            occupancy,
            full: self.full,
            empty: occupancy == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fifo::channel;

    #[test]
    fn test_fresh_producer() {
        let (tx, _rx) = channel(32, 2).unwrap();
        assert!(!tx.is_full());
        assert_eq!(tx.occupancy(), 0);
        assert_eq!(tx.capacity(), 4);
    }

    #[test]
    fn test_fills_after_capacity_pushes() {
        let (mut tx, _rx) = channel(32, 2).unwrap();
        for word in 0..4 {
            assert!(!tx.is_full());
            assert!(tx.try_push(word));
        }
        assert!(tx.is_full());
        assert_eq!(tx.occupancy(), 4);
        assert!(!tx.try_push(99));
        assert_eq!(tx.position(), 4);
    }

    #[test]
    fn test_words_are_truncated_to_width() {
        let (mut tx, mut rx) = channel(8, 2).unwrap();
        assert!(tx.try_push(0x1_23));
        rx.tick();
        rx.tick();
        assert_eq!(rx.try_pop(), Some(0x23));
    }

    #[test]
    fn test_full_clears_two_ticks_after_pop() {
        let (mut tx, mut rx) = channel(32, 2).unwrap();
        for word in 0..4 {
            tx.try_push(word);
        }
        rx.tick();
        rx.tick();
        assert_eq!(rx.try_pop(), Some(0));

        tx.tick();
        assert!(tx.is_full(), "read position still in the first relay stage");
        tx.tick();
        assert!(!tx.is_full());
        assert_eq!(tx.occupancy(), 3);
    }

    #[test]
    fn test_reset_clears_producer_side() {
        let (mut tx, _rx) = channel(32, 2).unwrap();
        for word in 0..4 {
            tx.try_push(word);
        }
        tx.reset();
        assert!(!tx.is_full());
        assert_eq!(tx.position(), 0);
        assert_eq!(tx.occupancy(), 0);
    }

    #[test]
    fn test_inactive_session_resets_on_tick() {
        let (mut tx, _rx) = channel(32, 2).unwrap();
        tx.try_push(1);
        tx.try_push(2);
        let session = tx.session();
        session.stop();
        assert!(!tx.try_push(3));
        assert_eq!(tx.position(), 0);
        session.start();
        assert!(tx.try_push(3));
        assert_eq!(tx.position(), 1);
    }

    #[test]
    fn test_drive_keeps_rejected_word_pending() {
        let (mut tx, mut rx) = channel(32, 2).unwrap();
        let mut source = 10..20u64;
        for _ in 0..4 {
            assert!(tx.drive(&mut source));
        }
        // Full going into this tick: nothing pulled.
        assert!(!tx.drive(&mut source));
        assert_eq!(tx.pending(), None);

        rx.tick();
        rx.tick();
        assert_eq!(rx.try_pop(), Some(10));
        tx.tick();
        tx.tick();
        assert!(tx.drive(&mut source));
        assert_eq!(source.next(), Some(15));
    }

    #[test]
    fn test_drive_pulls_nothing_while_session_stopped() {
        let (mut tx, _rx) = channel(32, 2).unwrap();
        let mut source = 0..10u64;
        let session = tx.session();
        session.stop();
        for _ in 0..3 {
            assert!(!tx.drive(&mut source));
            assert_eq!(tx.pending(), None);
        }

        session.start();
        assert!(tx.drive(&mut source));
        assert_eq!(tx.position(), 1);
        assert_eq!(source.next(), Some(1), "word 0 was the one stored");
    }
}

//! End-to-end behaviour of one FIFO driven tick by tick from a single thread.

use af_fifo::{channel, AsyncFifo, Consumer, FifoConfig, Producer};

const A: u64 = 0xA;
const B: u64 = 0xB;
const C: u64 = 0xC;
const D: u64 = 0xD;
const E: u64 = 0xE;

/// Two idle ticks per domain: enough to flush both relays.
fn settle(tx: &mut Producer, rx: &mut Consumer) {
    for _ in 0..2 {
        tx.tick();
        rx.tick();
    }
}

#[test]
fn test_fresh_fifo_boundary() {
    let (tx, rx) = channel(32, 12).unwrap();
    assert!(rx.is_empty());
    assert!(!tx.is_full());
    assert_eq!(tx.occupancy(), 0);
    assert_eq!(rx.occupancy(), 0);
    assert_eq!(tx.capacity(), 4096);
}

#[test]
fn test_capacity_four_scenario() {
    let (mut tx, mut rx) = channel(32, 2).unwrap();

    for word in [A, B, C, D] {
        assert!(tx.try_push(word));
    }
    assert!(tx.is_full());

    // Fifth push is rejected and does not overwrite anything.
    assert!(!tx.try_push(0xF));
    assert_eq!(tx.position(), 4);

    settle(&mut tx, &mut rx);
    assert_eq!(rx.try_pop(), Some(A));

    settle(&mut tx, &mut rx);
    assert!(!tx.is_full());
    assert!(tx.try_push(E));
    assert!(tx.is_full(), "E took the slot vacated by A");

    settle(&mut tx, &mut rx);
    let mut rest = Vec::new();
    while let Some(word) = rx.try_pop() {
        rest.push(word);
    }
    assert_eq!(rest, vec![B, C, D, E]);
}

#[test]
fn test_full_after_exactly_capacity_pushes() {
    let fifo = AsyncFifo::new(FifoConfig::with_capacity(16, 8).unwrap());
    let (mut tx, mut rx) = fifo.split();

    for word in 0..8 {
        assert!(!tx.is_full());
        assert!(tx.try_push(word));
    }
    assert!(tx.is_full());
    assert!(!tx.try_push(8));

    settle(&mut tx, &mut rx);
    assert_eq!(rx.try_pop(), Some(0));
    settle(&mut tx, &mut rx);
    assert!(!tx.is_full());
}

#[test]
fn test_fifo_order_over_many_laps() {
    let (mut tx, mut rx) = channel(32, 3).unwrap();
    let mut next_push = 0u64;
    let mut popped = Vec::new();

    while popped.len() < 100 {
        if next_push < 100 && tx.try_push(next_push) {
            next_push += 1;
        }
        if let Some(word) = rx.try_pop() {
            popped.push(word);
        }
    }
    assert_eq!(popped, (0..100).collect::<Vec<u64>>());
}

#[test]
fn test_views_agree_at_quiescence() {
    let (mut tx, mut rx) = channel(32, 4).unwrap();
    for word in 0..11 {
        tx.try_push(word);
    }
    settle(&mut tx, &mut rx);
    for _ in 0..4 {
        rx.try_pop();
    }

    // In flight: the views disagree.
    assert_ne!(tx.occupancy(), rx.occupancy());

    settle(&mut tx, &mut rx);
    assert_eq!(tx.occupancy(), 7);
    assert_eq!(rx.occupancy(), 7);
    assert_eq!(tx.status().occupancy, rx.status().occupancy);
}

#[test]
fn test_session_restart_resets_both_domains() {
    let fifo = AsyncFifo::with_geometry(32, 2).unwrap();
    let session = fifo.session();
    let (mut tx, mut rx) = fifo.split();

    for word in 0..3 {
        tx.try_push(word);
    }
    settle(&mut tx, &mut rx);
    rx.try_pop();

    session.stop();
    settle(&mut tx, &mut rx);
    session.start();

    assert_eq!(tx.position(), 0);
    assert_eq!(rx.position(), 0);
    assert!(rx.is_empty());
    assert!(!tx.is_full());

    assert!(tx.try_push(A));
    settle(&mut tx, &mut rx);
    assert_eq!(rx.try_pop(), Some(A));
}

#[test]
fn test_split_reset_is_not_corrected() {
    let (mut tx, mut rx) = channel(32, 2).unwrap();
    for word in 0..3 {
        tx.try_push(word);
    }
    settle(&mut tx, &mut rx);
    for _ in 0..3 {
        rx.try_pop();
    }

    // Only the producer resets; the consumer keeps its read position.
    tx.reset();
    settle(&mut tx, &mut rx);

    // The consumer now sees a write position behind its own: its view is
    // garbage until it is reset too.
    assert!(!rx.is_empty());
    assert_ne!(rx.occupancy(), 0);

    rx.reset();
    settle(&mut tx, &mut rx);
    assert!(rx.is_empty());
    assert_eq!(tx.occupancy(), 0);
    assert_eq!(rx.occupancy(), 0);
}

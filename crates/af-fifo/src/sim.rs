//! # Sim — Deterministic Dual-Clock Emulation
//!
//! Runs both domains on one thread against a shared virtual time axis.
//! Each domain ticks on its own period; at every instant the earliest
//! pending edge fires (producer first on a tie). With a fixed seed a run
//! is fully reproducible, which is what the randomized stress tests and
//! `af simulate` rely on.
//!
//! Every tick the simulator checks the observable invariants:
//! both occupancy views stay within `[0, capacity]`, `full` implies a
//! producer view of exactly `capacity`, `empty` implies a consumer view of
//! zero, and every popped word is the next one that was pushed.

use af_core::FifoConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::fifo::AsyncFifo;

/// A clock edge on the virtual time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Producer(u64),
    Consumer(u64),
}

/// Two unrelated tick periods, in arbitrary time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualClock {
    producer_period: u64,
    consumer_period: u64,
}

impl DualClock {
    /// Zero periods are bumped to one.
    pub fn new(producer_period: u64, consumer_period: u64) -> Self {
        Self {
            producer_period: producer_period.max(1),
            consumer_period: consumer_period.max(1),
        }
    }

    /// Endless edge sequence, in time order.
    pub fn edges(&self) -> Edges {
        Edges {
            clock: *self,
            next_producer: 0,
            next_consumer: 0,
        }
    }
}

/// Iterator returned by [`DualClock::edges`].
pub struct Edges {
    clock: DualClock,
    next_producer: u64,
    next_consumer: u64,
}

impl Iterator for Edges {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.next_producer <= self.next_consumer {
            let at = self.next_producer;
            self.next_producer += self.clock.producer_period;
            Some(Edge::Producer(at))
        } else {
            let at = self.next_consumer;
            self.next_consumer += self.clock.consumer_period;
            Some(Edge::Consumer(at))
        }
    }
}

/// Parameters of one randomized run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub fifo: FifoConfig,
    pub clock: DualClock,

    /// Words to transfer end to end.
    pub words: u64,

    /// Chance that a producer tick carries a push request. Clamped to
    /// `[0, 1]` by [`run`]; NaN counts as zero.
    pub push_probability: f64,

    /// Chance that a consumer tick carries a pop request. Clamped like
    /// `push_probability`.
    pub pop_probability: f64,

    pub seed: u64,

    /// Edge budget; the run stops early if it is exhausted.
    pub max_edges: u64,
}

impl SimConfig {
    pub fn new(fifo: FifoConfig, clock: DualClock, words: u64) -> Self {
        Self {
            fifo,
            clock,
            words,
            push_probability: 1.0,
            pop_probability: 1.0,
            seed: 0,
            max_edges: words.saturating_mul(1024).saturating_add(4096),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimReport {
    pub producer_ticks: u64,
    pub consumer_ticks: u64,
    pub pushed: u64,
    pub popped: u64,
    pub rejected_pushes: u64,
    pub empty_polls: u64,
    pub max_producer_occupancy: u32,
    pub max_consumer_occupancy: u32,

    /// Popped words that were not the next word pushed.
    pub order_violations: u64,

    /// Ticks on which an occupancy view or flag broke its invariant.
    pub invariant_violations: u64,

    /// Both occupancy views after the quiescence ticks.
    pub quiescent_occupancy: (u32, u32),

    /// All words transferred within the edge budget.
    pub completed: bool,
}

impl SimReport {
    pub fn is_clean(&self) -> bool {
        self.completed && self.order_violations == 0 && self.invariant_violations == 0
    }
}

/// Run one randomized transfer of `words` sequence-numbered words.
pub fn run(config: &SimConfig) -> SimReport {
    let fifo = AsyncFifo::new(config.fifo);
    let capacity = fifo.capacity() as u32;
    let mask = config.fifo.word_mask();
    let (mut tx, mut rx) = fifo.split();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let push_probability = clamp_probability(config.push_probability);
    let pop_probability = clamp_probability(config.pop_probability);
    let mut report = SimReport::default();

    let mut next_push = 0u64;
    let mut next_pop = 0u64;

    for edge in config.clock.edges().take(config.max_edges as usize) {
        match edge {
            Edge::Producer(_) => {
                report.producer_ticks += 1;
                if next_push < config.words && rng.gen_bool(push_probability) {
                    if tx.try_push(next_push) {
                        next_push += 1;
                    } else {
                        report.rejected_pushes += 1;
                    }
                } else {
                    tx.tick();
                }
            }
            Edge::Consumer(_) => {
                report.consumer_ticks += 1;
                if rng.gen_bool(pop_probability) {
                    match rx.try_pop() {
                        Some(word) => {
                            if word != next_pop & mask {
                                report.order_violations += 1;
                            }
                            next_pop += 1;
                        }
                        None => report.empty_polls += 1,
                    }
                } else {
                    rx.tick();
                }
            }
        }

        let (p, c) = (tx.occupancy(), rx.occupancy());
        report.max_producer_occupancy = report.max_producer_occupancy.max(p);
        report.max_consumer_occupancy = report.max_consumer_occupancy.max(c);
        if p > capacity
            || c > capacity
            || (tx.is_full() && p != capacity)
            || (rx.is_empty() && c != 0)
            || next_pop > next_push
        {
            report.invariant_violations += 1;
        }

        if next_pop == config.words {
            break;
        }
    }

    // Quiescence: two idle ticks per domain flush both relays.
    for _ in 0..2 {
        tx.tick();
        rx.tick();
    }

    report.pushed = next_push;
    report.popped = next_pop;
    report.quiescent_occupancy = (tx.occupancy(), rx.occupancy());
    report.completed = next_pop == config.words;

    tracing::debug!(
        pushed = report.pushed,
        popped = report.popped,
        rejected = report.rejected_pushes,
        "simulation finished"
    );
    report
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

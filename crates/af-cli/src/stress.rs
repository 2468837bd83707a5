//! Stress run on real concurrency: each domain is its own tokio task with
//! its own `interval` tick source, scheduled on a multi-threaded runtime.
//! The tasks never await each other; they only meet at join.
//!
//! The producer pushes a sequence-numbered stream, the consumer checks the
//! order as words arrive. Both sides fold their stream into a CRC32 so the
//! report can show end-to-end integrity at a glance.

use std::time::Duration;

use af_fifo::{AsyncFifo, Consumer, DomainStatus, FifoConfig, Producer, WordSink, WordSource};
use anyhow::Context;
use chrono::{DateTime, Utc};
use crc32fast::Hasher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::config::StressSection;

/// Upstream collaborator: sequence numbers truncated to the word width.
struct SequenceSource {
    next: u64,
    words: u64,
    mask: u64,
    hasher: Hasher,
}

impl SequenceSource {
    fn exhausted(&self) -> bool {
        self.next >= self.words
    }
}

impl WordSource for SequenceSource {
    fn next_word(&mut self) -> Option<u64> {
        if self.exhausted() {
            return None;
        }
        let word = self.next & self.mask;
        self.next += 1;
        self.hasher.update(&word.to_le_bytes());
        Some(word)
    }
}

/// Downstream collaborator: checks order and checksums what it receives.
struct CheckingSink {
    received: u64,
    mask: u64,
    order_violations: u64,
    hasher: Hasher,
}

impl WordSink for CheckingSink {
    fn accept(&mut self, word: u64) {
        if word != self.received & self.mask {
            self.order_violations += 1;
        }
        self.received += 1;
        self.hasher.update(&word.to_le_bytes());
    }
}

#[derive(Debug, Default)]
struct DomainStats {
    ticks: u64,
    transferred: u64,
    refused: u64,
}

#[derive(Debug, Serialize)]
pub struct StressReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    pub capacity: usize,
    pub words: u64,
    pub producer_ticks: u64,
    pub consumer_ticks: u64,
    pub pushed: u64,
    pub popped: u64,
    pub rejected_pushes: u64,
    pub empty_polls: u64,
    pub order_violations: u64,
    pub pushed_crc32: u32,
    pub popped_crc32: u32,
    pub checksum_match: bool,
    pub producer: DomainStatus,
    pub consumer: DomainStatus,
    pub completed: bool,
}

impl StressReport {
    pub fn is_clean(&self) -> bool {
        self.completed && self.order_violations == 0 && self.checksum_match
    }
}

pub fn run(fifo: FifoConfig, settings: &StressSection) -> anyhow::Result<StressReport> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    rt.block_on(run_domains(fifo, settings.clone()))
}

async fn run_domains(fifo: FifoConfig, settings: StressSection) -> anyhow::Result<StressReport> {
    let started_at = Utc::now();
    let start = Instant::now();
    let deadline = start + Duration::from_secs(settings.timeout_secs);
    let (tx, rx) = AsyncFifo::new(fifo).split();

    tracing::info!(
        capacity = fifo.capacity(),
        words = settings.words,
        producer_period_us = settings.producer_period_us,
        consumer_period_us = settings.consumer_period_us,
        "stress run starting"
    );

    let source = SequenceSource {
        next: 0,
        words: settings.words,
        mask: fifo.word_mask(),
        hasher: Hasher::new(),
    };
    let sink = CheckingSink {
        received: 0,
        mask: fifo.word_mask(),
        order_violations: 0,
        hasher: Hasher::new(),
    };

    let producer = tokio::spawn(producer_domain(tx, source, settings.clone(), deadline));
    let consumer = tokio::spawn(consumer_domain(rx, sink, settings.clone(), deadline));
    let (p, c) = tokio::try_join!(producer, consumer).context("domain task panicked")?;
    let (mut tx, source, pstats) = p;
    let (mut rx, sink, cstats) = c;

    // Quiescence: flush both relays before comparing views.
    for _ in 0..2 {
        tx.tick();
        rx.tick();
    }

    let pushed_crc32 = source.hasher.finalize();
    let popped_crc32 = sink.hasher.finalize();
    let report = StressReport {
        started_at,
        elapsed_ms: start.elapsed().as_millis(),
        capacity: fifo.capacity(),
        words: settings.words,
        producer_ticks: pstats.ticks,
        consumer_ticks: cstats.ticks,
        pushed: pstats.transferred,
        popped: cstats.transferred,
        rejected_pushes: pstats.refused,
        empty_polls: cstats.refused,
        order_violations: sink.order_violations,
        pushed_crc32,
        popped_crc32,
        checksum_match: pushed_crc32 == popped_crc32,
        producer: tx.status(),
        consumer: rx.status(),
        completed: sink.received == settings.words,
    };

    if report.is_clean() {
        tracing::info!(elapsed_ms = report.elapsed_ms, "stress run clean");
    } else {
        tracing::warn!(
            completed = report.completed,
            order_violations = report.order_violations,
            "stress run failed"
        );
    }
    Ok(report)
}

async fn producer_domain(
    mut tx: Producer,
    mut source: SequenceSource,
    settings: StressSection,
    deadline: Instant,
) -> (Producer, SequenceSource, DomainStats) {
    let mut ticker = interval(Duration::from_micros(settings.producer_period_us.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut stats = DomainStats::default();

    while (!source.exhausted() || tx.pending().is_some()) && Instant::now() < deadline {
        ticker.tick().await;
        stats.ticks += 1;
        if rng.gen_bool(settings.push_probability) {
            if tx.drive(&mut source) {
                stats.transferred += 1;
            } else {
                stats.refused += 1;
            }
        } else {
            tx.tick();
        }
    }
    (tx, source, stats)
}

async fn consumer_domain(
    mut rx: Consumer,
    mut sink: CheckingSink,
    settings: StressSection,
    deadline: Instant,
) -> (Consumer, CheckingSink, DomainStats) {
    let mut ticker = interval(Duration::from_micros(settings.consumer_period_us.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut rng = StdRng::seed_from_u64(settings.seed.wrapping_add(1));
    let mut stats = DomainStats::default();

    while sink.received < settings.words && Instant::now() < deadline {
        ticker.tick().await;
        stats.ticks += 1;
        if rng.gen_bool(settings.pop_probability) {
            if rx.drive(&mut sink) {
                stats.transferred += 1;
            } else {
                stats.refused += 1;
            }
        } else {
            rx.tick();
        }
    }
    (rx, sink, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_stress_run_is_clean() {
        let settings = StressSection {
            producer_period_us: 1,
            consumer_period_us: 3,
            words: 2_000,
            seed: 9,
            push_probability: 0.9,
            pop_probability: 0.9,
            timeout_secs: 60,
        };
        let fifo = FifoConfig::new(32, 3).unwrap();
        let report = run(fifo, &settings).unwrap();
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.pushed, 2_000);
        assert_eq!(report.producer.occupancy, 0);
        assert_eq!(report.consumer.occupancy, 0);
    }

    #[test]
    fn test_source_hashes_what_it_yields() {
        let mut source = SequenceSource {
            next: 0,
            words: 3,
            mask: 0xFF,
            hasher: Hasher::new(),
        };
        let mut sink = CheckingSink {
            received: 0,
            mask: 0xFF,
            order_violations: 0,
            hasher: Hasher::new(),
        };
        while let Some(word) = source.next_word() {
            sink.accept(word);
        }
        assert!(source.exhausted());
        assert_eq!(sink.order_violations, 0);
        assert_eq!(source.hasher.finalize(), sink.hasher.finalize());
    }
}

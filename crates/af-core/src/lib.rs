//! # af-core — The "Physics" of the dual-clock FIFO
//!
//! Everything here is pure arithmetic with no notion of threads or time:
//! the reflected-binary (Gray) encoding that lets a peer domain sample a
//! position while it is being updated, the `(address_width + 1)`-bit
//! pointer space used for occupancy and full/empty comparisons, and the
//! construction-time configuration checks.
//!
//! The Gray properties (round trip, single-bit adjacency) and the
//! full/empty exclusivity are formally verified with Kani, both inline
//! and in `af-verify`.

#![no_std]

mod config;
mod gray;
mod pointer;

pub use config::{
    ConfigError, FifoConfig, DEFAULT_ADDRESS_WIDTH, DEFAULT_WORD_WIDTH, MAX_ADDRESS_WIDTH,
    MAX_WORD_WIDTH, MIN_ADDRESS_WIDTH,
};
pub use gray::{bin2gray, gray2bin, gray_distance};
pub use pointer::PointerSpace;

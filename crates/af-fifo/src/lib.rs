//! # af-fifo — The "Engine" of the dual-clock FIFO
//!
//! A bounded circular buffer shared by two domains that never wait for
//! each other. Each domain keeps its own binary position, publishes its
//! Gray mirror with one atomic store, and imports the peer's Gray position
//! through a two-stage relay before trusting it for full/empty/occupancy.
//!
//! - [`Producer`] / [`Consumer`] — the two domain state machines
//! - [`SessionControl`] — the shared `start` control
//! - [`sim`] — deterministic dual-clock emulation

pub mod boundary;
mod consumer;
mod cursor;
mod fifo;
mod producer;
mod relay;
mod session;
pub mod sim;
mod status;
mod storage;

pub use af_core::{ConfigError, FifoConfig};
pub use boundary::{WordSink, WordSource};
pub use consumer::Consumer;
pub use fifo::{channel, AsyncFifo};
pub use producer::Producer;
pub use session::SessionControl;
pub use status::{Domain, DomainStatus};

//! Observable status of one domain.

use serde::Serialize;

/// Which side of the FIFO a status was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Producer,
    Consumer,
}

/// One domain's local view.
///
/// The two views are only weakly consistent: each sees its peer through its
/// own relay, so they may disagree while updates are in flight and agree
/// once both domains have been quiescent for two ticks.
///
/// The producer's `full` and the consumer's `empty` are the authoritative
/// registered flags; the other flag in each view is derived from that
/// view's occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainStatus {
    pub domain: Domain,

    /// Local binary position (`address_width + 1` bits).
    pub position: u32,

    /// Stored-but-unconsumed words as seen from this domain.
    pub occupancy: u32,

    pub full: bool,

    pub empty: bool,
}

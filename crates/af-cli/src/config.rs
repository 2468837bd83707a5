//! `af.toml` — FIFO geometry and stress-run settings.
//!
//! ```toml
//! [fifo]
//! word_width = 32
//! address_width = 12
//!
//! [stress]
//! producer_period_us = 10
//! consumer_period_us = 30
//! words = 100000
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::path::Path;

use af_core::{ConfigError, FifoConfig, DEFAULT_ADDRESS_WIDTH, DEFAULT_WORD_WIDTH};
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub fifo: FifoSection,
    #[serde(default)]
    pub stress: StressSection,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FifoSection {
    #[serde(default = "default_word_width")]
    pub word_width: u32,
    #[serde(default = "default_address_width")]
    pub address_width: u32,
}

impl Default for FifoSection {
    fn default() -> Self {
        Self {
            word_width: DEFAULT_WORD_WIDTH,
            address_width: DEFAULT_ADDRESS_WIDTH,
        }
    }
}

impl FifoSection {
    pub fn validate(&self) -> Result<FifoConfig, ConfigError> {
        FifoConfig::new(self.word_width, self.address_width)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StressSection {
    #[serde(default = "default_producer_period")]
    pub producer_period_us: u64,
    #[serde(default = "default_consumer_period")]
    pub consumer_period_us: u64,
    #[serde(default = "default_words")]
    pub words: u64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_probability")]
    pub push_probability: f64,
    #[serde(default = "default_probability")]
    pub pop_probability: f64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for StressSection {
    fn default() -> Self {
        Self {
            producer_period_us: 10,
            consumer_period_us: 30,
            words: 100_000,
            seed: 0,
            push_probability: 1.0,
            pop_probability: 1.0,
            timeout_secs: 60,
        }
    }
}

fn default_word_width() -> u32 {
    DEFAULT_WORD_WIDTH
}
fn default_address_width() -> u32 {
    DEFAULT_ADDRESS_WIDTH
}
fn default_producer_period() -> u64 {
    10
}
fn default_consumer_period() -> u64 {
    30
}
fn default_words() -> u64 {
    100_000
}
fn default_probability() -> f64 {
    1.0
}
fn default_timeout() -> u64 {
    60
}

/// Load `path`, or defaults if it does not exist.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!("no config at {:?}, using defaults", path);
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.fifo.word_width, 32);
        assert_eq!(config.fifo.address_width, 12);
        assert_eq!(config.stress.consumer_period_us, 30);
        assert_eq!(config.stress.pop_probability, 1.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[fifo]\naddress_width = 4\n").unwrap();
        assert_eq!(config.fifo.address_width, 4);
        assert_eq!(config.fifo.word_width, 32);
        assert_eq!(config.fifo.validate().unwrap().capacity(), 16);
    }

    #[test]
    fn test_invalid_geometry_surfaces_on_validate() {
        let config: Config = toml::from_str("[fifo]\naddress_width = 1\n").unwrap();
        assert_eq!(
            config.fifo.validate(),
            Err(ConfigError::AddressWidthTooSmall(1))
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load(Path::new("/nonexistent/af.toml")).unwrap();
        assert_eq!(config.stress.words, 100_000);
    }
}

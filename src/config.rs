//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::ysf::protocol::{MODEM_FRAME_LENGTH, YSF_CALLSIGN_LENGTH};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Repeater/gateway callsign, inserted into relayed headers
    #[serde(default = "default_callsign")]
    pub callsign: String,

    /// Maximum transmission duration in seconds; 0 disables the limit
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u32,

    /// Repeat received RF frames back out through the modem
    #[serde(default = "default_duplex")]
    pub duplex: bool,

    /// Output queue capacity in bytes
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,

    #[serde(default)]
    pub dump: DumpConfig,
}

/// Diagnostic raw-frame capture configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DumpConfig {
    /// Write each relayed RF frame to a per-call capture file
    #[serde(default)]
    pub enabled: bool,

    /// Directory the capture files are created in
    #[serde(default = "default_dump_dir")]
    pub dir: String,
}

// Default value functions
fn default_callsign() -> String { "N0CALL".to_string() }
fn default_timeout_s() -> u32 { 180 }
fn default_duplex() -> bool { true }
fn default_queue_size() -> usize { 5000 }
fn default_dump_dir() -> String { ".".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            callsign: default_callsign(),
            timeout_s: default_timeout_s(),
            duplex: default_duplex(),
            queue_size: default_queue_size(),
            dump: DumpConfig::default(),
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_dump_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.callsign.trim().is_empty() {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom("callsign cannot be empty")
            ));
        }

        if self.callsign.len() > YSF_CALLSIGN_LENGTH {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom(format!(
                    "callsign cannot exceed {} characters", YSF_CALLSIGN_LENGTH
                ))
            ));
        }

        if !self.callsign.is_ascii() {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom("callsign must be ASCII")
            ));
        }

        // timeout_s == 0 means no transmission limit
        if self.timeout_s > 3600 {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom("timeout_s must be between 0 and 3600")
            ));
        }

        // The queue must hold at least one length-prefixed frame record
        if self.queue_size <= MODEM_FRAME_LENGTH {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom(format!(
                    "queue_size must be greater than {}", MODEM_FRAME_LENGTH
                ))
            ));
        }

        if self.queue_size > 65536 {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom("queue_size must not exceed 65536")
            ));
        }

        if self.dump.enabled && self.dump.dir.is_empty() {
            return Err(crate::error::YsfBridgeError::Config(
                toml::de::Error::custom("dump dir cannot be empty when enabled")
            ));
        }

        Ok(())
    }
}

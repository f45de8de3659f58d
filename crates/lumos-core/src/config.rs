//! Transmitter configuration
//!
//! Everything is defaulted, so an empty TOML file yields a sender for
//! universe 1 on the standard port.

use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cid::Cid;
use crate::error::{LumosError, ValidationError};
use crate::packet::framing::{DEFAULT_PRIORITY, DEFAULT_SOURCE_NAME, MAX_PRIORITY};
use crate::packet::DataPacketOptions;
use crate::Result;

/// Default sACN port
pub const SACN_PORT: u16 = 5568;

/// Settings for one [`Transmitter`](crate::Transmitter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmitterConfig {
    pub universe: u16,
    pub port: u16,
    /// Overrides the multicast group derived from the universe
    pub destination: Option<Ipv4Addr>,
    /// Local interface address to send from
    pub bind_ip: Option<Ipv4Addr>,
    /// Multicast TTL, i.e. how many network segments the stream may cross
    pub ttl: u32,
    pub multicast_loop: bool,
    pub source_name: String,
    pub priority: u8,
    pub sync_universe: u16,
    /// Fixed CID, written as a UUID string; generated at startup when absent
    pub cid: Option<Cid>,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            universe: 1,
            port: SACN_PORT,
            destination: None,
            bind_ip: None,
            ttl: 1,
            multicast_loop: true,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            priority: DEFAULT_PRIORITY,
            sync_universe: 0,
            cid: None,
        }
    }
}

impl TransmitterConfig {
    /// Create a config for a universe
    pub fn new(universe: u16) -> Self {
        Self {
            universe,
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_destination(mut self, destination: Ipv4Addr) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_bind_ip(mut self, bind_ip: Ipv4Addr) -> Self {
        self.bind_ip = Some(bind_ip);
        self
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sync_universe(mut self, sync_universe: u16) -> Self {
        self.sync_universe = sync_universe;
        self
    }

    pub fn with_cid(mut self, cid: Cid) -> Self {
        self.cid = Some(cid);
        self
    }

    /// The configured CID, or `fallback` when none is set
    pub fn resolve_cid(&self, fallback: Cid) -> Cid {
        self.cid.unwrap_or(fallback)
    }

    /// Check the source settings every data packet will carry
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.priority > MAX_PRIORITY {
            return Err(ValidationError::InvalidPriority(self.priority));
        }
        if !self.source_name.is_ascii() {
            return Err(ValidationError::InvalidSourceName);
        }
        Ok(())
    }

    /// Packet options for this source
    pub fn packet_options(&self, cid: Cid) -> DataPacketOptions {
        DataPacketOptions::new(cid)
            .with_source_name(self.source_name.clone())
            .with_priority(self.priority)
            .with_sync_universe(self.sync_universe)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, e.g. "info" or "lumos_core=trace"
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top level config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumosConfig {
    pub transmitter: TransmitterConfig,
    pub log: LogConfig,
}

impl LumosConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LumosError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }
}

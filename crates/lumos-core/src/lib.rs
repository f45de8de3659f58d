//! Lumos Core - E1.31 (sACN) output for lighting control
//!
//! This crate builds and sends Streaming ACN datagrams:
//! - **Packets**: Root, Framing, Sync-Framing and DMP layers encoded bit-exact
//! - **Transmitter**: UDP multicast sender with per-stream sequence numbers
//! - **Config**: TOML-loadable transmitter and logging settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumos_core::{Cid, Transmitter, TransmitterConfig};
//!
//! # fn main() -> lumos_core::Result<()> {
//! // Generate the component identifier once at startup
//! let cid = Cid::generate();
//!
//! let mut transmitter = Transmitter::new(&TransmitterConfig::new(1), cid)?;
//! transmitter.send(&[255, 128, 0])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`packet`] - PDU layers and packet composition
//! - [`transmitter`] - Multicast sender
//! - [`cid`] - Component identifiers
//! - [`config`] - Configuration
//! - [`error`] - Error types

/// Component identifiers
pub mod cid;
/// Transmitter and logging configuration
pub mod config;
/// Error types
pub mod error;
/// E1.31 packet layers
pub mod packet;
/// Multicast sender
pub mod transmitter;

// Re-exports
pub use cid::Cid;
pub use config::{LogConfig, LumosConfig, TransmitterConfig, SACN_PORT};
pub use error::{LumosError, Result, ValidationError};
pub use packet::{build_data_packet, build_sync_packet, DataPacketOptions};
pub use transmitter::{multicast_addr, SequenceCounter, Transmitter};

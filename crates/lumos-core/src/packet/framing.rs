//! E1.31 data framing layer
//!
//! Carries the per-source fields (name, priority, sequence) and the target
//! universe, and wraps an already encoded DMP PDU.

use super::length::encode_length;
use crate::error::ValidationError;

/// Framing bytes counted in the length field ahead of the DMP PDU
pub const FRAMING_HEADER_LENGTH: usize = 77;

/// VECTOR_E131_DATA_PACKET
pub const VECTOR_E131_DATA_PACKET: u32 = 0x0000_0002;

/// Width of the source name field
pub const SOURCE_NAME_LENGTH: usize = 64;

/// Source name used when none is configured
pub const DEFAULT_SOURCE_NAME: &str = "lumos";

/// Default sACN priority
pub const DEFAULT_PRIORITY: u8 = 100;

/// Highest valid sACN priority
pub const MAX_PRIORITY: u8 = 200;

/// Options bit: force synchronization
pub const FORCE_SYNCHRONIZATION: u8 = 0x20;

/// Framing layer of a data packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramingLayer<'a> {
    pub source_name: &'a str,
    pub priority: u8,
    pub sequence: u8,
    /// 0 when the stream is not synchronized
    pub sync_universe: u16,
    pub universe: u16,
}

impl Default for FramingLayer<'_> {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME,
            priority: DEFAULT_PRIORITY,
            sequence: 0,
            sync_universe: 0,
            universe: 1,
        }
    }
}

impl FramingLayer<'_> {
    /// Options byte.
    ///
    /// Force synchronization is set whether or not a sync universe is in use.
    pub fn options(&self) -> u8 {
        FORCE_SYNCHRONIZATION
    }

    /// Serialize the framing layer around an encoded DMP PDU
    pub fn encode(&self, dmp: &[u8]) -> Result<Vec<u8>, ValidationError> {
        if self.priority > MAX_PRIORITY {
            return Err(ValidationError::InvalidPriority(self.priority));
        }
        if !self.source_name.is_ascii() {
            return Err(ValidationError::InvalidSourceName);
        }

        let mut packet = Vec::with_capacity(FRAMING_HEADER_LENGTH + 2 + dmp.len());

        // Flags and Length
        packet.extend_from_slice(&encode_length(FRAMING_HEADER_LENGTH + dmp.len())?);

        // Vector
        packet.extend_from_slice(&VECTOR_E131_DATA_PACKET.to_be_bytes());

        // Source Name, null padded, cut at the field width
        let name = self.source_name.as_bytes();
        let copy_len = name.len().min(SOURCE_NAME_LENGTH);
        packet.extend_from_slice(&name[..copy_len]);
        packet.resize(packet.len() + SOURCE_NAME_LENGTH - copy_len, 0);

        // Priority
        packet.push(self.priority);

        // Reserved
        packet.extend_from_slice(&[0x00, 0x00]);

        // Synchronization Address
        packet.extend_from_slice(&self.sync_universe.to_be_bytes());

        // Sequence Number
        packet.push(self.sequence);

        // Options
        packet.push(self.options());

        // Universe
        packet.extend_from_slice(&self.universe.to_be_bytes());

        packet.extend_from_slice(dmp);

        Ok(packet)
    }
}

//! Synchronization framing layer
//!
//! A sync packet tells receivers to apply the frames they have buffered for
//! the given sync universe. It carries no levels.

use super::length::encode_length;
use crate::error::ValidationError;

/// Length value written into the sync framing PDU
pub const SYNC_FRAMING_LENGTH: usize = 11;

/// Bytes the sync framing PDU occupies on the wire
pub const SYNC_FRAMING_ENCODED_LENGTH: usize = SYNC_FRAMING_LENGTH + 2;

/// VECTOR_E131_EXTENDED_SYNCHRONIZATION
pub const VECTOR_E131_SYNC_PACKET: u32 = 0x0000_0001;

const SYNC_RESERVED: [u8; 4] = [0x00, 0x10, 0x00, 0x00];

/// Framing layer of a sync packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncFramingLayer {
    pub sequence: u8,
    pub sync_universe: u16,
}

impl SyncFramingLayer {
    /// Serialize the sync framing PDU
    pub fn encode(&self) -> Result<Vec<u8>, ValidationError> {
        let mut packet = Vec::with_capacity(SYNC_FRAMING_ENCODED_LENGTH);

        packet.extend_from_slice(&encode_length(SYNC_FRAMING_LENGTH)?);
        packet.extend_from_slice(&VECTOR_E131_SYNC_PACKET.to_be_bytes());
        packet.push(self.sequence);
        packet.extend_from_slice(&self.sync_universe.to_be_bytes());
        packet.extend_from_slice(&SYNC_RESERVED);

        Ok(packet)
    }
}

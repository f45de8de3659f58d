//! ACN root layer
//!
//! The outer header shared by every E1.31 datagram.

use super::length::encode_length;
use crate::cid::Cid;
use crate::error::ValidationError;

/// Preamble Size
pub const PREAMBLE_SIZE: u16 = 0x0010;

/// Post-amble Size
pub const POSTAMBLE_SIZE: u16 = 0x0000;

/// ACN Packet Identifier
pub const ACN_PACKET_IDENTIFIER: [u8; 12] = *b"ASC-E1.17\0\0\0";

/// VECTOR_ROOT_E131_DATA
pub const VECTOR_ROOT_E131_DATA: u32 = 0x0000_0004;

/// Root layer bytes from the flags and length field through the CID
pub const ROOT_PDU_HEADER_LENGTH: usize = 22;

/// Bytes ahead of the root PDU: preamble, post-amble and identifier
pub const ROOT_PREAMBLE_LENGTH: usize = 16;

/// Root layer stamped with the sender's CID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootLayer {
    cid: Cid,
}

impl RootLayer {
    pub fn new(cid: Cid) -> Self {
        Self { cid }
    }

    /// Build a root layer from raw CID bytes, which must be exactly 16 long
    pub fn from_cid_bytes(cid: &[u8]) -> Result<Self, ValidationError> {
        Ok(Self::new(Cid::try_from(cid)?))
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// Serialize the root layer around an encoded framing PDU
    pub fn encode(&self, framing: &[u8]) -> Result<Vec<u8>, ValidationError> {
        let mut packet =
            Vec::with_capacity(ROOT_PREAMBLE_LENGTH + ROOT_PDU_HEADER_LENGTH + framing.len());

        // Preamble Size
        packet.extend_from_slice(&PREAMBLE_SIZE.to_be_bytes());

        // Post-amble Size
        packet.extend_from_slice(&POSTAMBLE_SIZE.to_be_bytes());

        // ACN Packet Identifier
        packet.extend_from_slice(&ACN_PACKET_IDENTIFIER);

        // Flags and Length, counted from here to the end of the datagram
        packet.extend_from_slice(&encode_length(ROOT_PDU_HEADER_LENGTH + framing.len())?);

        // Vector
        packet.extend_from_slice(&VECTOR_ROOT_E131_DATA.to_be_bytes());

        // CID
        packet.extend_from_slice(self.cid.as_bytes());

        packet.extend_from_slice(framing);

        Ok(packet)
    }
}

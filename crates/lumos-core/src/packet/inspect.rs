//! Read-back of packets built by this crate
//!
//! Only checks what is needed to pull the fields back out of our own layout.

use super::dmp::VECTOR_DMP_SET_PROPERTY;
use super::framing::{SOURCE_NAME_LENGTH, VECTOR_E131_DATA_PACKET};
use super::length::decode_length;
use super::root::{ACN_PACKET_IDENTIFIER, ROOT_PREAMBLE_LENGTH, VECTOR_ROOT_E131_DATA};
use crate::cid::Cid;
use crate::error::ValidationError;

const ROOT_LENGTH_OFFSET: usize = 16;
const CID_OFFSET: usize = 22;
const FRAMING_OFFSET: usize = 38;
const DMP_OFFSET: usize = FRAMING_OFFSET + 79;
const LEVELS_OFFSET: usize = DMP_OFFSET + 11;

/// Fields of an encoded data packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPacketView<'a> {
    pub root_length: u16,
    pub framing_length: u16,
    pub dmp_length: u16,
    pub cid: Cid,
    pub source_name: &'a [u8],
    pub priority: u8,
    pub sync_universe: u16,
    pub sequence: u8,
    pub options: u8,
    pub universe: u16,
    pub levels: &'a [u8],
}

fn be_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

fn be_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

impl<'a> DataPacketView<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<Self, ValidationError> {
        if buf.len() < LEVELS_OFFSET {
            return Err(ValidationError::Malformed("too short for a data packet"));
        }
        if buf[4..ROOT_PREAMBLE_LENGTH] != ACN_PACKET_IDENTIFIER {
            return Err(ValidationError::Malformed("invalid ACN packet identifier"));
        }
        if be_u32(buf, 18) != VECTOR_ROOT_E131_DATA {
            return Err(ValidationError::Malformed("invalid root vector"));
        }
        if be_u32(buf, FRAMING_OFFSET + 2) != VECTOR_E131_DATA_PACKET {
            return Err(ValidationError::Malformed("not a data packet"));
        }
        if buf[DMP_OFFSET + 2] != VECTOR_DMP_SET_PROPERTY {
            return Err(ValidationError::Malformed("invalid DMP vector"));
        }

        let value_count = be_u16(buf, DMP_OFFSET + 8) as usize;
        let levels_end = LEVELS_OFFSET + value_count.saturating_sub(1);
        if value_count == 0 || levels_end > buf.len() {
            return Err(ValidationError::Malformed("property value count out of range"));
        }

        let framing = &buf[FRAMING_OFFSET..];
        Ok(Self {
            root_length: decode_length([buf[ROOT_LENGTH_OFFSET], buf[ROOT_LENGTH_OFFSET + 1]]),
            framing_length: decode_length([framing[0], framing[1]]),
            dmp_length: decode_length([buf[DMP_OFFSET], buf[DMP_OFFSET + 1]]),
            cid: Cid::try_from(&buf[CID_OFFSET..FRAMING_OFFSET])?,
            source_name: &framing[6..6 + SOURCE_NAME_LENGTH],
            priority: framing[70],
            sync_universe: be_u16(framing, 73),
            sequence: framing[75],
            options: framing[76],
            universe: be_u16(framing, 77),
            levels: &buf[LEVELS_OFFSET..levels_end],
        })
    }

    /// Source name with the null padding stripped
    pub fn source_name_str(&self) -> String {
        String::from_utf8_lossy(self.source_name)
            .trim_end_matches('\0')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_buffer() {
        assert_eq!(
            DataPacketView::parse(&[0u8; 40]),
            Err(ValidationError::Malformed("too short for a data packet"))
        );
    }

    #[test]
    fn test_rejects_foreign_identifier() {
        let mut buf = vec![0u8; 200];
        buf[4..16].copy_from_slice(b"Art-Net\0\0\0\0\0");
        assert!(DataPacketView::parse(&buf).is_err());
    }
}

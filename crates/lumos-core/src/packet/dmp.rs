//! DMP layer: the PDU that carries the channel levels

use super::length::encode_length;
use crate::error::ValidationError;

/// Channels in one DMX512 universe
pub const UNIVERSE_CHANNEL_CAPACITY: usize = 512;

/// DMP header bytes ahead of the start code
pub const DMP_HEADER_LENGTH: usize = 10;

/// VECTOR_DMP_SET_PROPERTY
pub const VECTOR_DMP_SET_PROPERTY: u8 = 0x02;

/// Address type and data type: absolute, range, one-byte values
pub const DMP_ADDRESS_DATA_TYPE: u8 = 0xa1;

/// DMX512 null start code
pub const DMX_START_CODE: u8 = 0x00;

/// Device Management Protocol PDU holding up to 512 levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmpLayer<'a> {
    levels: &'a [u8],
}

impl<'a> DmpLayer<'a> {
    /// Wrap a frame of channel levels
    pub fn new(levels: &'a [u8]) -> Result<Self, ValidationError> {
        if levels.len() > UNIVERSE_CHANNEL_CAPACITY {
            return Err(ValidationError::TooManyLevels {
                count: levels.len(),
                max: UNIVERSE_CHANNEL_CAPACITY,
            });
        }
        Ok(Self { levels })
    }

    /// PDU length: header, start code and levels
    pub fn length(&self) -> usize {
        DMP_HEADER_LENGTH + 1 + self.levels.len()
    }

    /// Serialize the PDU
    pub fn encode(&self) -> Result<Vec<u8>, ValidationError> {
        let mut packet = Vec::with_capacity(self.length());

        // Flags and Length
        packet.extend_from_slice(&encode_length(self.length())?);

        // Vector
        packet.push(VECTOR_DMP_SET_PROPERTY);

        // Address Type & Data Type
        packet.push(DMP_ADDRESS_DATA_TYPE);

        // First Property Address
        packet.extend_from_slice(&0x0000u16.to_be_bytes());

        // Address Increment
        packet.extend_from_slice(&0x0001u16.to_be_bytes());

        // Property value count: start code plus levels
        packet.extend_from_slice(&(1 + self.levels.len() as u16).to_be_bytes());

        // DMX Start Code
        packet.push(DMX_START_CODE);

        packet.extend_from_slice(self.levels);

        Ok(packet)
    }
}

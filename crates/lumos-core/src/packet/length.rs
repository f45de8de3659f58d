//! PDU flags and length field
//!
//! Every PDU starts with a 16-bit field whose top nibble holds the ACN flags
//! (vector, header and data present) and whose low 12 bits hold the length.

use crate::error::ValidationError;

/// Flags nibble shared by every PDU this crate emits
pub const PDU_FLAGS: u16 = 0x7000;

/// Largest length the 12-bit field can carry
pub const MAX_PDU_LENGTH: usize = 0x0fff;

/// Pack a PDU length under the flags nibble.
///
/// Lengths above 4095 would spill into the flag bits and are rejected.
pub fn encode_length(length: usize) -> Result<[u8; 2], ValidationError> {
    if length > MAX_PDU_LENGTH {
        return Err(ValidationError::LengthOutOfRange(length));
    }
    Ok((PDU_FLAGS | length as u16).to_be_bytes())
}

/// Recover the 12-bit length from a flags and length field
pub fn decode_length(field: [u8; 2]) -> u16 {
    u16::from_be_bytes(field) & MAX_PDU_LENGTH as u16
}

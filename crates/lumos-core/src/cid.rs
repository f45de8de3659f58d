//! Component identifiers
//!
//! Every sACN packet carries a 16-byte CID naming the component that sent it.
//! Receivers use it to tell sources apart, so a sender should keep the same
//! CID for its whole lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LumosError, ValidationError};

/// Size of a CID on the wire
pub const CID_LENGTH: usize = 16;

/// A 16-byte ACN component identifier
///
/// Serialized as a UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Uuid", into = "Uuid")]
pub struct Cid([u8; CID_LENGTH]);

impl Cid {
    /// Generate a fresh time-based CID.
    ///
    /// Call this once at startup and pass the value wherever packets are built.
    pub fn generate() -> Self {
        Self(*Uuid::now_v7().as_bytes())
    }

    /// Raw bytes as written into the root layer
    pub fn as_bytes(&self) -> &[u8; CID_LENGTH] {
        &self.0
    }
}

impl From<[u8; CID_LENGTH]> for Cid {
    fn from(bytes: [u8; CID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Uuid> for Cid {
    fn from(uuid: Uuid) -> Self {
        Self(*uuid.as_bytes())
    }
}

impl From<Cid> for Uuid {
    fn from(cid: Cid) -> Self {
        Uuid::from_bytes(cid.0)
    }
}

impl TryFrom<&[u8]> for Cid {
    type Error = ValidationError;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        let bytes: [u8; CID_LENGTH] = bytes
            .try_into()
            .map_err(|_| ValidationError::InvalidCid(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl FromStr for Cid {
    type Err = LumosError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self::from)
            .map_err(|e| LumosError::Config(format!("invalid CID '{}': {}", s, e)))
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_bytes(self.0).hyphenated())
    }
}

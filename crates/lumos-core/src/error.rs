//! Error types for packet construction and transmission
use thiserror::Error;

/// Errors raised while building a packet, before anything touches the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// More DMX levels than a universe can carry
    #[error("too many DMX levels: {count} (max {max})")]
    TooManyLevels { count: usize, max: usize },

    /// Component identifier is not exactly 16 bytes
    #[error("CID must be 16 bytes, got {0}")]
    InvalidCid(usize),

    /// PDU length does not fit the 12-bit length field
    #[error("PDU length {0} exceeds the 12-bit length field")]
    LengthOutOfRange(usize),

    /// Priority above the 0-200 range
    #[error("invalid priority: {0} (must be 0-200)")]
    InvalidPriority(u8),

    /// Source name contains non-ASCII characters
    #[error("source name must be ASCII")]
    InvalidSourceName,

    /// A sync packet was requested without a sync universe
    #[error("no sync universe configured")]
    SyncUniverseUnset,

    /// A buffer handed to the inspector does not look like one of our packets
    #[error("malformed packet: {0}")]
    Malformed(&'static str),
}

/// Errors for the sACN sender
#[derive(Error, Debug)]
pub enum LumosError {
    /// Packet failed validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Socket creation, option or send failure
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for LumosError {
    fn from(e: toml::de::Error) -> Self {
        LumosError::Config(e.to_string())
    }
}

/// Result type for lumos operations
pub type Result<T> = std::result::Result<T, LumosError>;

//! E1.31 packet encoding
//!
//! A data packet nests three PDUs:
//!
//! ```text
//! Root (preamble, identifier, CID)
//! └── Framing (source name, priority, sequence, universe)
//!     └── DMP (start code + up to 512 levels)
//! ```
//!
//! A sync packet replaces the framing and DMP layers with a single sync
//! framing PDU.
//!
//! ## Example
//!
//! ```rust
//! use lumos_core::packet::{build_data_packet, DataPacketOptions};
//! use lumos_core::Cid;
//!
//! # fn main() -> lumos_core::Result<()> {
//! let options = DataPacketOptions::new(Cid::generate()).with_source_name("Front of house");
//! let packet = build_data_packet(&options, 1, &[255, 128, 0], 0)?;
//! assert_eq!(packet.len(), 128 + 3);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dmp;
pub mod framing;
pub mod inspect;
pub mod length;
pub mod root;
pub mod sync;

pub use builder::{build_data_packet, build_sync_packet, DataPacketOptions};
pub use dmp::{DmpLayer, UNIVERSE_CHANNEL_CAPACITY};
pub use framing::FramingLayer;
pub use inspect::DataPacketView;
pub use length::{decode_length, encode_length};
pub use root::RootLayer;
pub use sync::SyncFramingLayer;

/// Size of a data packet carrying `levels` channel values
pub const fn data_packet_len(levels: usize) -> usize {
    root::ROOT_PREAMBLE_LENGTH
        + root::ROOT_PDU_HEADER_LENGTH
        + framing::FRAMING_HEADER_LENGTH
        + 2
        + dmp::DMP_HEADER_LENGTH
        + 1
        + levels
}

/// Size of every sync packet
pub const SYNC_PACKET_LEN: usize =
    root::ROOT_PREAMBLE_LENGTH + root::ROOT_PDU_HEADER_LENGTH + sync::SYNC_FRAMING_ENCODED_LENGTH;

//! Packet composition
//!
//! Stateless functions that stack the layers into a finished datagram. Each
//! layer is encoded first and handed to the layer that wraps it, so every
//! length field comes from bytes that already exist.

use super::dmp::DmpLayer;
use super::framing::{FramingLayer, DEFAULT_PRIORITY, DEFAULT_SOURCE_NAME};
use super::root::RootLayer;
use super::sync::SyncFramingLayer;
use crate::cid::Cid;
use crate::Result;

/// Source settings for data packets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPacketOptions {
    pub cid: Cid,
    pub source_name: String,
    pub priority: u8,
    /// 0 when the stream is not synchronized
    pub sync_universe: u16,
}

impl DataPacketOptions {
    /// Defaults for everything except the CID
    pub fn new(cid: Cid) -> Self {
        Self {
            cid,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            priority: DEFAULT_PRIORITY,
            sync_universe: 0,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sync_universe(mut self, sync_universe: u16) -> Self {
        self.sync_universe = sync_universe;
        self
    }
}

/// Build an E1.31 data packet carrying `levels` for `universe`
pub fn build_data_packet(
    options: &DataPacketOptions,
    universe: u16,
    levels: &[u8],
    sequence: u8,
) -> Result<Vec<u8>> {
    let dmp = DmpLayer::new(levels)?.encode()?;

    let framing = FramingLayer {
        source_name: &options.source_name,
        priority: options.priority,
        sequence,
        sync_universe: options.sync_universe,
        universe,
    }
    .encode(&dmp)?;

    Ok(RootLayer::new(options.cid).encode(&framing)?)
}

/// Build an E1.31 synchronization packet
pub fn build_sync_packet(cid: Cid, sequence: u8, sync_universe: u16) -> Result<Vec<u8>> {
    let framing = SyncFramingLayer {
        sequence,
        sync_universe,
    }
    .encode()?;

    Ok(RootLayer::new(cid).encode(&framing)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LumosError, ValidationError};

    #[test]
    fn test_full_universe_packet_size() {
        let options = DataPacketOptions::new(Cid::from([1; 16]));
        let packet = build_data_packet(&options, 1, &[0u8; 512], 0).unwrap();

        // 638 byte E1.31 frame plus the two reserved framing bytes
        assert_eq!(packet.len(), 640);
        // DMX start code
        assert_eq!(packet[127], 0x00);
    }

    #[test]
    fn test_validation_before_encoding() {
        let options = DataPacketOptions::new(Cid::from([1; 16]));
        let result = build_data_packet(&options, 1, &[0u8; 513], 0);
        assert!(matches!(
            result,
            Err(LumosError::Validation(ValidationError::TooManyLevels { .. }))
        ));

        let options = options.with_priority(250);
        let result = build_data_packet(&options, 1, &[], 0);
        assert!(matches!(
            result,
            Err(LumosError::Validation(ValidationError::InvalidPriority(250)))
        ));
    }

    #[test]
    fn test_sync_packet_size() {
        let packet = build_sync_packet(Cid::from([1; 16]), 9, 5).unwrap();
        assert_eq!(packet.len(), 51);
        assert_eq!(&packet[16..18], &[0x70, 35]);
    }
}

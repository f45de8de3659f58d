//! sACN (E1.31) multicast sender
//!
//! One [`Transmitter`] per universe. It owns the socket and the sequence
//! counters, so it must be driven from a single sender; share it behind a
//! mutex if several threads need it.

use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

use crate::cid::Cid;
use crate::config::TransmitterConfig;
use crate::error::ValidationError;
use crate::packet::{build_data_packet, build_sync_packet, DataPacketOptions};
use crate::Result;

/// Multicast group for a universe: 239.255.<high byte>.<low byte>
pub fn multicast_addr(universe: u16) -> Ipv4Addr {
    let [high, low] = universe.to_be_bytes();
    Ipv4Addr::new(239, 255, high, low)
}

/// Per-stream sequence number.
///
/// Starts at 255 so the first packet goes out with 255 and the next wraps to
/// 0, which receivers take as a fresh stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCounter(u8);

impl Default for SequenceCounter {
    fn default() -> Self {
        Self(u8::MAX)
    }
}

impl SequenceCounter {
    pub fn current(&self) -> u8 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Open a UDP socket on the wildcard address with the multicast options applied
fn open_socket(config: &TransmitterConfig) -> Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.bind(&SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0).into())?;

    // Outgoing multicast interface, selected by its address
    if let Some(bind_ip) = config.bind_ip {
        socket.set_multicast_if_v4(&bind_ip)?;
    }
    socket.set_multicast_ttl_v4(config.ttl)?;
    socket.set_multicast_loop_v4(config.multicast_loop)?;

    Ok(socket.into())
}

/// sACN sender for one universe
pub struct Transmitter {
    socket: UdpSocket,
    universe: u16,
    destination: SocketAddrV4,
    /// Fixed address for every datagram; multicast groups are derived when unset
    destination_override: Option<Ipv4Addr>,
    options: DataPacketOptions,
    sequence: SequenceCounter,
    sync_sequence: SequenceCounter,
}

impl Transmitter {
    /// Open a socket for the configured universe.
    ///
    /// `cid` is used unless the config pins its own. Source settings are
    /// validated here so a bad priority or name fails once, not on every send.
    pub fn new(config: &TransmitterConfig, cid: Cid) -> Result<Self> {
        config.validate()?;
        let cid = config.resolve_cid(cid);
        let socket = open_socket(config)?;

        let ip = config
            .destination
            .unwrap_or_else(|| multicast_addr(config.universe));
        let destination = SocketAddrV4::new(ip, config.port);

        tracing::info!(
            "sACN transmitter created for universe {} -> {} (ttl {}, cid {})",
            config.universe,
            destination,
            config.ttl,
            cid
        );

        Ok(Self {
            socket,
            universe: config.universe,
            destination,
            destination_override: config.destination,
            options: config.packet_options(cid),
            sequence: SequenceCounter::default(),
            sync_sequence: SequenceCounter::default(),
        })
    }

    /// Send one frame of levels as a single datagram.
    ///
    /// The packet is validated before anything is written. Once built, the
    /// sequence number is consumed even if the send fails.
    pub fn send(&mut self, levels: &[u8]) -> Result<usize> {
        let sequence = self.sequence.current();
        let packet = build_data_packet(&self.options, self.universe, levels, sequence)?;
        self.sequence.advance();

        let sent = self.socket.send_to(&packet, self.destination)?;

        tracing::trace!(
            "Sent sACN DMX packet for universe {} (seq {}, {} bytes)",
            self.universe,
            sequence,
            sent
        );

        Ok(sent)
    }

    /// Send a sync packet for the configured sync universe.
    ///
    /// Goes to the destination override when one is configured, otherwise to
    /// the sync universe's multicast group, on the configured port. Uses its
    /// own sequence counter.
    pub fn send_sync(&mut self) -> Result<usize> {
        let sync_universe = self.options.sync_universe;
        if sync_universe == 0 {
            return Err(ValidationError::SyncUniverseUnset.into());
        }

        let packet = build_sync_packet(
            self.options.cid,
            self.sync_sequence.current(),
            sync_universe,
        )?;
        self.sync_sequence.advance();

        let ip = self
            .destination_override
            .unwrap_or_else(|| multicast_addr(sync_universe));
        let destination = SocketAddrV4::new(ip, self.destination.port());
        let sent = self.socket.send_to(&packet, destination)?;

        tracing::debug!("Sent sACN sync packet for sync universe {}", sync_universe);

        Ok(sent)
    }

    /// Get the current universe
    pub fn universe(&self) -> u16 {
        self.universe
    }

    /// Address and port datagrams are sent to
    pub fn destination(&self) -> SocketAddrV4 {
        self.destination
    }

    /// Sequence number the next data packet will carry
    pub fn sequence(&self) -> u8 {
        self.sequence.current()
    }

    pub fn cid(&self) -> Cid {
        self.options.cid
    }

    /// Local address of the socket
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multicast_addr() {
        assert_eq!(multicast_addr(1), Ipv4Addr::new(239, 255, 0, 1));
        assert_eq!(multicast_addr(300), Ipv4Addr::new(239, 255, 1, 44));
        assert_eq!(multicast_addr(1).to_string(), "239.255.0.1");
        assert_eq!(multicast_addr(300).to_string(), "239.255.1.44");
    }

    #[test]
    fn test_sequence_counter_wraps() {
        let mut counter = SequenceCounter::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(counter.current());
            counter.advance();
        }
        assert_eq!(seen, vec![255, 0, 1, 2]);
    }

    #[test]
    fn test_transmitter_creation() {
        let config = TransmitterConfig::new(300).with_port(6000);
        let transmitter = Transmitter::new(&config, Cid::generate()).unwrap();

        assert_eq!(transmitter.universe(), 300);
        assert_eq!(
            transmitter.destination(),
            SocketAddrV4::new(Ipv4Addr::new(239, 255, 1, 44), 6000)
        );
        assert_eq!(transmitter.sequence(), 255);
    }

    #[test]
    fn test_destination_override() {
        let config = TransmitterConfig::new(1).with_destination(Ipv4Addr::LOCALHOST);
        let transmitter = Transmitter::new(&config, Cid::generate()).unwrap();
        assert_eq!(
            transmitter.destination(),
            SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5568)
        );
    }

    #[test]
    fn test_invalid_frame_keeps_sequence() {
        let config = TransmitterConfig::new(1).with_destination(Ipv4Addr::LOCALHOST);
        let mut transmitter = Transmitter::new(&config, Cid::generate()).unwrap();

        assert!(transmitter.send(&[0u8; 513]).is_err());
        assert_eq!(transmitter.sequence(), 255);
    }

    #[test]
    fn test_invalid_priority_rejected_at_construction() {
        let config = TransmitterConfig::new(1)
            .with_destination(Ipv4Addr::LOCALHOST)
            .with_priority(250);

        assert!(matches!(
            Transmitter::new(&config, Cid::generate()),
            Err(crate::LumosError::Validation(ValidationError::InvalidPriority(250)))
        ));
    }

    #[test]
    fn test_invalid_source_name_rejected_at_construction() {
        let config = TransmitterConfig::new(1).with_source_name("Bühne");

        assert!(matches!(
            Transmitter::new(&config, Cid::generate()),
            Err(crate::LumosError::Validation(ValidationError::InvalidSourceName))
        ));
    }

    #[test]
    fn test_multicast_interface_keeps_source_unbound() {
        let config = TransmitterConfig::new(1)
            .with_destination(Ipv4Addr::LOCALHOST)
            .with_bind_ip(Ipv4Addr::LOCALHOST);
        let transmitter = Transmitter::new(&config, Cid::generate()).unwrap();

        let local = transmitter.local_addr().unwrap();
        assert!(local.ip().is_unspecified());
        assert_ne!(local.port(), 0);
    }

    #[test]
    fn test_sync_requires_sync_universe() {
        let config = TransmitterConfig::new(1).with_destination(Ipv4Addr::LOCALHOST);
        let mut transmitter = Transmitter::new(&config, Cid::generate()).unwrap();

        assert!(matches!(
            transmitter.send_sync(),
            Err(crate::LumosError::Validation(ValidationError::SyncUniverseUnset))
        ));
    }
}

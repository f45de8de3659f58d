use std::net::{Ipv4Addr, UdpSocket};
use std::time::Duration;

use lumos_core::packet::{DataPacketView, SYNC_PACKET_LEN};
use lumos_core::{Cid, Transmitter, TransmitterConfig};

fn loopback_receiver() -> UdpSocket {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).expect("Failed to bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("Failed to set read timeout");
    socket
}

fn loopback_transmitter(receiver: &UdpSocket, cid: Cid) -> Transmitter {
    let port = receiver.local_addr().unwrap().port();
    let config = TransmitterConfig::new(1)
        .with_destination(Ipv4Addr::LOCALHOST)
        .with_port(port)
        .with_source_name("loopback");
    Transmitter::new(&config, cid).expect("Failed to create transmitter")
}

#[test]
fn test_sequence_wraparound_on_the_wire() {
    let receiver = loopback_receiver();
    let mut transmitter = loopback_transmitter(&receiver, Cid::generate());

    let mut buf = [0u8; 1024];
    let mut sequences = Vec::new();
    for _ in 0..4 {
        transmitter.send(&[10, 20, 30]).unwrap();
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        sequences.push(DataPacketView::parse(&buf[..len]).unwrap().sequence);
    }

    assert_eq!(sequences, vec![255, 0, 1, 2]);
    assert_eq!(transmitter.sequence(), 3);
}

#[test]
fn test_sent_datagram_matches_frame() {
    let receiver = loopback_receiver();
    let cid = Cid::generate();
    let mut transmitter = loopback_transmitter(&receiver, cid);

    let levels = [255u8; 512];
    let sent = transmitter.send(&levels).unwrap();

    let mut buf = [0u8; 1024];
    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    assert_eq!(len, sent);
    assert_eq!(len, 640);

    let view = DataPacketView::parse(&buf[..len]).unwrap();
    assert_eq!(view.cid, cid);
    assert_eq!(view.universe, 1);
    assert_eq!(view.source_name_str(), "loopback");
    assert_eq!(view.levels, &levels[..]);
}

#[test]
fn test_sync_packets_follow_destination_override() {
    let receiver = loopback_receiver();
    let port = receiver.local_addr().unwrap().port();
    let config = TransmitterConfig::new(1)
        .with_destination(Ipv4Addr::LOCALHOST)
        .with_port(port)
        .with_sync_universe(7);
    let mut transmitter = Transmitter::new(&config, Cid::generate()).unwrap();

    let mut buf = [0u8; 1024];
    let mut sequences = Vec::new();
    for _ in 0..2 {
        let sent = transmitter.send_sync().unwrap();
        let (len, _) = receiver.recv_from(&mut buf).unwrap();

        assert_eq!(sent, SYNC_PACKET_LEN);
        assert_eq!(len, 51);
        // Sync framing vector
        assert_eq!(&buf[40..44], &[0, 0, 0, 1]);
        // Sync universe
        assert_eq!(&buf[45..47], &[0, 7]);
        sequences.push(buf[44]);
    }

    assert_eq!(sequences, vec![255, 0]);
    // Data stream keeps its own counter
    assert_eq!(transmitter.sequence(), 255);
}

#[test]
fn test_pinned_cid_from_config() {
    let receiver = loopback_receiver();
    let port = receiver.local_addr().unwrap().port();
    let config = TransmitterConfig::new(1)
        .with_destination(Ipv4Addr::LOCALHOST)
        .with_port(port)
        .with_cid("67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap());
    let mut transmitter = Transmitter::new(&config, Cid::generate()).unwrap();
    transmitter.send(&[]).unwrap();

    let mut buf = [0u8; 1024];
    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    let view = DataPacketView::parse(&buf[..len]).unwrap();
    assert_eq!(
        view.cid.to_string(),
        "67e55044-10b1-426f-9247-bb680e5fe0c8"
    );
    assert!(view.levels.is_empty());
}

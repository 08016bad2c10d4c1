//! Integration tests driving a [`Session`] against a loop-back UDP stub that
//! replays canned responses, covering the scenarios a FINS client must get
//! right: word/REAL encode-decode, multi-address reads, status/clock
//! decoding, a forged protocol error, and a timeout against a dead peer.

use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use omron_fins::session::Protocol;
use omron_fins::{FinsError, NodeAddress, Session, SessionConfig};

/// Decodes a whitespace-separated hex byte string, e.g. `"82 06 A4 00 00
/// 0A"`, as used in the scenario fixtures below — keeps the fixtures
/// looking like the byte dumps they are grounded on instead of `u8` arrays.
fn hex_bytes(literal: &str) -> Vec<u8> {
    hex::decode(literal.replace(' ', "")).expect("fixture literal is valid hex")
}

fn build_response(request: &[u8], main_code: u8, sub_code: u8, payload: &[u8]) -> Vec<u8> {
    let mut response = vec![
        0xC0,         // icf: response
        0x00,         // rsv
        0x02,         // gct
        request[6],   // dna <- request's sna
        request[7],   // da1 <- request's sa1
        request[8],   // da2 <- request's sa2
        request[3],   // sna <- request's dna
        request[4],   // sa1 <- request's da1
        request[5],   // sa2 <- request's da2
        request[9],   // sid, echoed
        request[10],  // command, echoed
        request[11],
        main_code,
        sub_code,
    ];
    response.extend_from_slice(payload);
    response
}

/// Spawns a UDP stub that replies to every datagram it receives with
/// `handler(request_bytes)`, until the test process exits.
fn spawn_stub(addr: &str, handler: impl Fn(&[u8]) -> Vec<u8> + Send + 'static) {
    let socket = UdpSocket::bind(addr).expect("bind stub socket");
    thread::spawn(move || {
        let mut buf = [0u8; 2048];
        loop {
            let (size, peer) = match socket.recv_from(&mut buf) {
                Ok(v) => v,
                Err(_) => return,
            };
            let response = handler(&buf[..size]);
            let _ = socket.send_to(&response, peer);
        }
    });
}

fn test_session(port: u16) -> Session {
    let config = SessionConfig::new("127.0.0.1")
        .with_port(port)
        .with_protocol(Protocol::Udp)
        .with_timeout(Duration::from_millis(500))
        .with_destination(NodeAddress::plc_node(10, 0).unwrap())
        .with_source(NodeAddress::pc_node(1, 0).unwrap());
    Session::new(config)
}

#[test]
fn test_read_ten_words_from_dm1700() {
    let port = 19601;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        assert_eq!(&request[12..18], &hex_bytes("82 06 A4 00 00 0A")[..]);
        let mut payload = hex_bytes("00 21");
        payload.extend(std::iter::repeat(0u8).take(16));
        build_response(request, 0, 0, &payload)
    });
    let session = test_session(port);
    let values = session.read("DM1700", 10).unwrap();
    assert_eq!(values, vec![33, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_write_real_encodes_word_swapped_payload() {
    let port = 19602;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        assert_eq!(&request[12..16], &hex_bytes("82 06 A6 00")[..]);
        assert_eq!(&request[16..18], &hex_bytes("00 02")[..]);
        assert_eq!(&request[18..22], &hex_bytes("00 00 41 24")[..]);
        build_response(request, 0, 0, &[])
    });
    let session = test_session(port);
    session.write_real("D1702", 10.25).unwrap();
}

#[test]
fn test_read_real_decodes_word_swapped_payload() {
    let port = 19603;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        build_response(request, 0, 0, &hex_bytes("00 00 41 24"))
    });
    let session = test_session(port);
    let value = session.read_real("D1702").unwrap();
    assert!((value - 10.25).abs() < f32::EPSILON);
}

#[test]
fn test_read_multiple_maps_each_address_to_its_value() {
    let port = 19604;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        let mut payload = vec![];
        for word in [40111u16, 555, 33, 0, 0, 0] {
            payload.extend_from_slice(&word.to_be_bytes());
        }
        build_response(request, 0, 0, &payload)
    });
    let session = test_session(port);
    let values = session
        .read_multiple(vec!["D0", "D100", "D1700", "CIO10", "WR100", "HR100"])
        .unwrap();
    let map: std::collections::HashMap<_, _> = values.into_iter().collect();
    assert_eq!(map["DM0000"], 40111);
    assert_eq!(map["DM0100"], 555);
    assert_eq!(map["DM1700"], 33);
    assert_eq!(map["CIO0010"], 0);
    assert_eq!(map["WR0100"], 0);
    assert_eq!(map["HR0100"], 0);
}

#[test]
fn test_get_status_decodes_run_mode_bit() {
    let port = 19605;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        build_response(request, 0, 0, &[0x01])
    });
    let session = test_session(port);
    let status = session.get_status().unwrap();
    assert!(status.run_mode);
    assert!(!status.program_mode);
    assert!(!status.fatal_error);
    assert!(!status.non_fatal_error);
}

#[test]
fn test_read_clock_expands_year_and_fields() {
    let port = 19606;
    spawn_stub(&format!("127.0.0.1:{port}"), |request| {
        build_response(request, 0, 0, &[24, 3, 15, 14, 30, 0, 5])
    });
    let session = test_session(port);
    let clock = session.read_clock().unwrap();
    assert_eq!(clock.year, 2024);
    assert_eq!(clock.month, 3);
    assert_eq!(clock.day, 15);
    assert_eq!(clock.hour, 14);
    assert_eq!(clock.minute, 30);
    assert_eq!(clock.second, 0);
    assert_eq!(clock.day_of_week, 5);
}

#[test]
fn test_forged_protocol_error_keeps_session_usable_and_advances_sid() {
    let port = 19607;
    let seen_sids = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_sids_in_stub = seen_sids.clone();
    spawn_stub(&format!("127.0.0.1:{port}"), move |request| {
        seen_sids_in_stub.lock().unwrap().push(request[9]);
        build_response(request, 0x01, 0x02, &[])
    });
    let session = test_session(port);

    match session.read("D0", 1) {
        Err(FinsError::Protocol { main_code, sub_code }) => {
            assert_eq!(main_code, 0x01);
            assert_eq!(sub_code, 0x02);
        }
        other => panic!("expected Protocol error, got {other:?}"),
    }

    // The session survives a protocol error and the next call's SID
    // advances by exactly one.
    let _ = session.read("D0", 1);

    let sids = seen_sids.lock().unwrap();
    assert_eq!(sids.len(), 2);
    assert_eq!(sids[1], sids[0].wrapping_add(1));
}

#[test]
fn test_blackholed_udp_times_out_and_session_stays_usable() {
    let port = 19608;
    // No stub bound on this port: every request blackholes until timeout.
    let config = SessionConfig::new("127.0.0.1")
        .with_port(port)
        .with_protocol(Protocol::Udp)
        .with_timeout(Duration::from_millis(200))
        .with_destination(NodeAddress::plc_node(10, 0).unwrap())
        .with_source(NodeAddress::pc_node(1, 0).unwrap());
    let session = Session::new(config);

    let start = std::time::Instant::now();
    let result = session.read("D0", 1);
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(FinsError::Timeout)));
    assert!(elapsed >= Duration::from_millis(180));
    assert!(elapsed <= Duration::from_millis(600));

    // The session accepts a subsequent operation (it just times out again).
    let result = session.read("D0", 1);
    assert!(matches!(result, Err(FinsError::Timeout)));
}

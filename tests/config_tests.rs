//! Config Tests
//!
//! Transport parsing, the construction-time validation boundary.

use wirekv::{KvError, Transport};

#[test]
fn test_parse_stream() {
    assert_eq!("stream".parse::<Transport>().unwrap(), Transport::Stream);
}

#[test]
fn test_parse_datagram() {
    assert_eq!("datagram".parse::<Transport>().unwrap(), Transport::Datagram);
}

#[test]
fn test_default_transport_is_stream() {
    assert_eq!(Transport::default(), Transport::Stream);
}

#[test]
fn test_unsupported_transport_is_config_error() {
    let result = "carrier-pigeon".parse::<Transport>();
    match result {
        Err(KvError::Config(message)) => assert!(message.contains("carrier-pigeon")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_display_matches_wire_names() {
    assert_eq!(Transport::Stream.to_string(), "stream");
    assert_eq!(Transport::Datagram.to_string(), "datagram");
}

//! Integration tests for wirekv
//!
//! Drive a real server and client over localhost sockets, one thread
//! each. Every test binds port 0 so runs never collide.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, UdpSocket};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde_json::{json, Map, Value};
use wirekv::protocol::{encode, write_frame};
use wirekv::{Client, KvError, Server, Transport};

fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Bind a server on an ephemeral port and serve `cycles` requests on a
/// background thread. Returns the bound address and a handle yielding
/// the server back for post-mortem assertions on its store.
fn spawn_server(transport: Transport, cycles: usize) -> (SocketAddr, JoinHandle<Server>) {
    let mut server = Server::bind(0, transport).unwrap();
    let addr = server.local_addr().unwrap();

    let handle = thread::spawn(move || {
        for _ in 0..cycles {
            server.listen().unwrap();
        }
        server
    });

    (addr, handle)
}

fn client_for(addr: SocketAddr, transport: Transport) -> Client {
    Client::new("127.0.0.1", addr.port(), transport)
}

// =============================================================================
// Stream Transport Tests
// =============================================================================

#[test]
fn test_stream_get_on_fresh_store_is_empty() {
    let (addr, handle) = spawn_server(Transport::Stream, 1);
    let client = client_for(addr, Transport::Stream);

    assert!(client.get().unwrap().is_empty());
    handle.join().unwrap();
}

#[test]
fn test_stream_update_then_get() {
    let (addr, handle) = spawn_server(Transport::Stream, 2);
    let client = client_for(addr, Transport::Stream);

    client.update(obj(json!({"x": 1}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));

    let server = handle.join().unwrap();
    assert_eq!(server.store().get("x"), Some(&json!(1)));
}

#[test]
fn test_stream_merge_overwrites_and_retains() {
    let (addr, handle) = spawn_server(Transport::Stream, 3);
    let client = client_for(addr, Transport::Stream);

    client.update(obj(json!({"a": 1}))).unwrap();
    client.update(obj(json!({"a": 3, "b": 2}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"a": 3, "b": 2})));

    handle.join().unwrap();
}

#[test]
fn test_stream_clear_empties_store() {
    let (addr, handle) = spawn_server(Transport::Stream, 3);
    let client = client_for(addr, Transport::Stream);

    client.update(obj(json!({"a": 1}))).unwrap();
    client.clear().unwrap();
    assert!(client.get().unwrap().is_empty());

    let server = handle.join().unwrap();
    assert!(server.store().is_empty());
}

#[test]
fn test_stream_unknown_type_ignored_without_reply() {
    let (addr, handle) = spawn_server(Transport::Stream, 3);
    let client = client_for(addr, Transport::Stream);

    client.update(obj(json!({"x": 1}))).unwrap();

    // hand-rolled request with an unrecognized type
    let mut stream = TcpStream::connect(addr_on_loopback(addr)).unwrap();
    write_frame(&mut stream, &json!({"type": "noop", "data": null})).unwrap();

    // no reply: the server closes the connection without writing
    let mut buf = [0u8; 1];
    assert_eq!(stream.read(&mut buf).unwrap(), 0);

    // and the store is untouched
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));
    handle.join().unwrap();
}

#[test]
fn test_stream_truncated_frame_is_contained() {
    let (addr, handle) = spawn_server(Transport::Stream, 3);
    let client = client_for(addr, Transport::Stream);

    // declares 10 payload bytes, delivers 5, then closes
    {
        let mut stream = TcpStream::connect(addr_on_loopback(addr)).unwrap();
        stream.write_all(&10u32.to_be_bytes()).unwrap();
        stream.write_all(b"{\"a\":").unwrap();
    }

    // the endpoint survives for the next requests
    client.update(obj(json!({"x": 1}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));

    handle.join().unwrap();
}

#[test]
fn test_stream_invalid_json_is_contained() {
    let (addr, handle) = spawn_server(Transport::Stream, 3);
    let client = client_for(addr, Transport::Stream);

    {
        let mut stream = TcpStream::connect(addr_on_loopback(addr)).unwrap();
        let payload = b"not json at all";
        stream.write_all(&(payload.len() as u32).to_be_bytes()).unwrap();
        stream.write_all(payload).unwrap();
    }

    client.update(obj(json!({"x": 1}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));

    handle.join().unwrap();
}

// =============================================================================
// Datagram Transport Tests
// =============================================================================

#[test]
fn test_datagram_update_then_get() {
    let (addr, handle) = spawn_server(Transport::Datagram, 2);
    let client = client_for(addr, Transport::Datagram);

    client.update(obj(json!({"x": 1}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));

    let server = handle.join().unwrap();
    assert_eq!(server.store().get("x"), Some(&json!(1)));
}

#[test]
fn test_datagram_clear_empties_store() {
    let (addr, handle) = spawn_server(Transport::Datagram, 3);
    let client = client_for(addr, Transport::Datagram);

    client.update(obj(json!({"a": 1, "b": 2}))).unwrap();
    client.clear().unwrap();
    assert!(client.get().unwrap().is_empty());

    handle.join().unwrap();
}

#[test]
fn test_datagram_unknown_type_ignored_without_reply() {
    let (addr, handle) = spawn_server(Transport::Datagram, 3);
    let client = client_for(addr, Transport::Datagram);

    client.update(obj(json!({"x": 1}))).unwrap();

    // unrecognized type straight onto the wire
    let socket = UdpSocket::bind(("0.0.0.0", 0)).unwrap();
    let request = encode(&json!({"type": "noop", "data": null})).unwrap();
    socket.send_to(&request, addr_on_loopback(addr)).unwrap();

    // no reply datagram comes back (timeout is test-side only)
    socket
        .set_read_timeout(Some(Duration::from_millis(200)))
        .unwrap();
    let mut buf = [0u8; 64];
    assert!(socket.recv_from(&mut buf).is_err());

    // and the store is untouched
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));
    handle.join().unwrap();
}

#[test]
fn test_datagram_invalid_json_is_contained() {
    let (addr, handle) = spawn_server(Transport::Datagram, 3);
    let client = client_for(addr, Transport::Datagram);

    let socket = UdpSocket::bind(("0.0.0.0", 0)).unwrap();
    socket
        .send_to(b"this is not json", addr_on_loopback(addr))
        .unwrap();

    client.update(obj(json!({"x": 1}))).unwrap();
    assert_eq!(client.get().unwrap(), obj(json!({"x": 1})));

    handle.join().unwrap();
}

// =============================================================================
// Isolation and Error Propagation Tests
// =============================================================================

#[test]
fn test_independent_servers_do_not_share_state() {
    let (first_addr, first_handle) = spawn_server(Transport::Stream, 2);
    let (second_addr, second_handle) = spawn_server(Transport::Stream, 1);

    let first = client_for(first_addr, Transport::Stream);
    let second = client_for(second_addr, Transport::Stream);

    first.update(obj(json!({"only": "here"}))).unwrap();
    assert_eq!(first.get().unwrap(), obj(json!({"only": "here"})));
    assert!(second.get().unwrap().is_empty());

    first_handle.join().unwrap();
    second_handle.join().unwrap();
}

#[test]
fn test_stream_client_surfaces_connect_failure() {
    // grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = Client::new("127.0.0.1", port, Transport::Stream);
    assert!(matches!(client.get(), Err(KvError::Io(_))));
}

fn addr_on_loopback(addr: SocketAddr) -> (&'static str, u16) {
    ("127.0.0.1", addr.port())
}

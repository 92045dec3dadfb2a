//! Store server
//!
//! Owns the store and a bound endpoint; serves one request per call.

use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};

use serde_json::{Map, Value};

use crate::config::Transport;
use crate::error::{KvError, Result};
use crate::protocol::{self, Request, RequestKind, MAX_DATAGRAM_SIZE};
use crate::store::Store;

/// The bound socket, fixed at construction
enum Endpoint {
    Stream(TcpListener),
    Datagram(UdpSocket),
}

/// A single-transport key-value server.
///
/// Owns one [`Store`] and one bound socket. [`Server::listen`] serves
/// exactly one request and returns; sustained service is a caller loop
/// over `listen`, which keeps the component testable in isolation.
pub struct Server {
    endpoint: Endpoint,
    store: Store,
}

impl Server {
    /// Bind a server on all interfaces at `port`.
    ///
    /// The store starts empty. Binding port 0 asks the OS for an
    /// ephemeral port; see [`Server::local_addr`].
    pub fn bind(port: u16, transport: Transport) -> Result<Server> {
        let addr = ("0.0.0.0", port);
        let endpoint = match transport {
            Transport::Stream => Endpoint::Stream(TcpListener::bind(addr)?),
            Transport::Datagram => Endpoint::Datagram(UdpSocket::bind(addr)?),
        };

        Ok(Server {
            endpoint,
            store: Store::new(),
        })
    }

    /// The locally bound address
    pub fn local_addr(&self) -> Result<SocketAddr> {
        let addr = match &self.endpoint {
            Endpoint::Stream(listener) => listener.local_addr()?,
            Endpoint::Datagram(socket) => socket.local_addr()?,
        };
        Ok(addr)
    }

    /// Read access to the store contents
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Serve exactly one request, then return.
    ///
    /// Blocks until a request arrives. Stream mode accepts one
    /// connection, reads one framed request, replies only to `get`,
    /// and closes the connection on every path. Datagram mode receives
    /// one datagram and replies only to `get`, to the originating
    /// address.
    ///
    /// Framing and decode faults are contained: they are logged, the
    /// connection is released, and the call returns `Ok(())` with the
    /// endpoint still usable for the next call. Transport I/O errors
    /// propagate to the caller.
    pub fn listen(&mut self) -> Result<()> {
        let outcome = match self.endpoint {
            Endpoint::Stream(ref listener) => {
                let (stream, peer) = listener.accept()?;
                tracing::debug!(%peer, "accepted stream connection");
                // the stream drops (and closes) on every exit path
                serve_stream(&mut self.store, &stream)
            }
            Endpoint::Datagram(ref socket) => serve_datagram(&mut self.store, socket),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(e @ (KvError::Framing(_) | KvError::Decode(_))) => {
                tracing::warn!(error = %e, "discarding malformed request");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// One request cycle on an accepted connection
fn serve_stream(store: &mut Store, mut stream: &TcpStream) -> Result<()> {
    let request: Request = protocol::read_frame(&mut stream)?;
    if let Some(reply) = dispatch(store, request) {
        protocol::write_frame(&mut stream, reply)?;
    }
    Ok(())
}

/// One request cycle on the datagram socket
fn serve_datagram(store: &mut Store, socket: &UdpSocket) -> Result<()> {
    let mut buf = [0u8; MAX_DATAGRAM_SIZE];
    let (len, peer) = socket.recv_from(&mut buf)?;
    tracing::debug!(%peer, bytes = len, "received datagram");

    let request: Request = protocol::decode(&buf[..len])?;
    if let Some(reply) = dispatch(store, request) {
        socket.send_to(&protocol::encode(reply)?, peer)?;
    }
    Ok(())
}

/// Apply one request to the store.
///
/// `Some` carries the reply to send back; `update` and `clear` never
/// reply. Unrecognized kinds are ignored without touching the store.
fn dispatch(store: &mut Store, request: Request) -> Option<&Map<String, Value>> {
    match request.kind {
        RequestKind::Update => {
            match request.data {
                Value::Object(incoming) => {
                    store.merge(incoming);
                    tracing::debug!(entries = store.len(), "store updated");
                }
                _ => tracing::warn!("ignoring update whose payload is not an object"),
            }
            None
        }
        RequestKind::Get => Some(store.snapshot()),
        RequestKind::Clear => {
            store.clear();
            tracing::debug!("store cleared");
            None
        }
        RequestKind::Unknown => {
            tracing::debug!("ignoring request with unrecognized type");
            None
        }
    }
}

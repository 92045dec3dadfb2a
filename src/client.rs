//! One-shot request/response client
//!
//! Bound to a fixed remote endpoint and transport. Every operation
//! opens a fresh socket, performs one request (and for [`Client::get`]
//! one reply), and releases the socket before returning — on success
//! and on error alike. There is no connection reuse and no retry.

use std::net::{TcpStream, UdpSocket};

use serde_json::{Map, Value};

use crate::config::Transport;
use crate::error::Result;
use crate::protocol::{self, Request, MAX_DATAGRAM_SIZE};

/// A client for one remote wirekv server.
pub struct Client {
    host: String,
    port: u16,
    transport: Transport,
}

impl Client {
    /// Create a client for the server at `host:port` over `transport`.
    ///
    /// No socket is created until an operation runs.
    pub fn new(host: impl Into<String>, port: u16, transport: Transport) -> Client {
        Client {
            host: host.into(),
            port,
            transport,
        }
    }

    /// Merge `data` into the remote store. No reply is awaited.
    pub fn update(&self, data: Map<String, Value>) -> Result<()> {
        self.send(&Request::update(data))
    }

    /// Fetch the entire remote store.
    ///
    /// Blocks until the reply arrives; there is no timeout.
    pub fn get(&self) -> Result<Map<String, Value>> {
        match self.transport {
            Transport::Stream => {
                let mut stream = self.connect()?;
                protocol::write_frame(&mut stream, &Request::get())?;
                protocol::read_frame(&mut stream)
            }
            Transport::Datagram => {
                let socket = self.local_socket()?;
                socket.send_to(&protocol::encode(&Request::get())?, self.remote())?;

                let mut buf = [0u8; MAX_DATAGRAM_SIZE];
                let (len, _) = socket.recv_from(&mut buf)?;
                protocol::decode(&buf[..len])
            }
        }
    }

    /// Remove every entry from the remote store. No reply is awaited.
    pub fn clear(&self) -> Result<()> {
        self.send(&Request::clear())
    }

    // transmit one request and drop the socket without reading
    fn send(&self, request: &Request) -> Result<()> {
        match self.transport {
            Transport::Stream => {
                let mut stream = self.connect()?;
                protocol::write_frame(&mut stream, request)
            }
            Transport::Datagram => {
                let socket = self.local_socket()?;
                socket.send_to(&protocol::encode(request)?, self.remote())?;
                Ok(())
            }
        }
    }

    fn connect(&self) -> Result<TcpStream> {
        Ok(TcpStream::connect(self.remote())?)
    }

    fn local_socket(&self) -> Result<UdpSocket> {
        Ok(UdpSocket::bind(("0.0.0.0", 0))?)
    }

    fn remote(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

//! Configuration for wirekv
//!
//! Owns the transport selection and its parse boundary. An unsupported
//! transport string fails here, before any socket is created.

use std::fmt;
use std::str::FromStr;

use crate::error::KvError;

/// Which transport an endpoint speaks. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Connection-oriented byte stream (TCP), length-prefixed framing
    #[default]
    Stream,

    /// Connectionless datagrams (UDP), one message per datagram
    Datagram,
}

impl FromStr for Transport {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stream" => Ok(Transport::Stream),
            "datagram" => Ok(Transport::Datagram),
            other => Err(KvError::Config(format!("unsupported transport `{other}`"))),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stream => f.write_str("stream"),
            Transport::Datagram => f.write_str("datagram"),
        }
    }
}

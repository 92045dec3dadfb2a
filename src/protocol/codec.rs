//! Protocol codec
//!
//! Encoding, decoding and framing for the wire protocol.
//!
//! Every message is a UTF-8 JSON document. On the stream transport a
//! message is delimited by a 4-byte unsigned big-endian length prefix;
//! on the datagram transport the datagram boundary delimits it and the
//! whole message must fit in [`MAX_DATAGRAM_SIZE`] bytes.

use std::io::{ErrorKind, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{KvError, Result};

/// Size of the stream length prefix
pub const LEN_PREFIX_SIZE: usize = 4;

/// Upper bound on a declared stream payload length (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// A datagram message must fit in a single datagram of this many bytes
pub const MAX_DATAGRAM_SIZE: usize = 1024;

/// Serialize a value to its JSON wire bytes
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Parse JSON wire bytes back into a value
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write one length-prefixed frame to a stream
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    let payload = encode(value)?;
    writer.write_all(&(payload.len() as u32).to_be_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed frame from a stream
///
/// Reads exactly four prefix bytes, then exactly the declared number of
/// payload bytes, before attempting to parse. A short read in either
/// phase is a [`KvError::Framing`] fault, as is a declared length over
/// [`MAX_FRAME_SIZE`].
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<T> {
    let mut prefix = [0u8; LEN_PREFIX_SIZE];
    read_exact_framed(reader, &mut prefix, "length prefix")?;

    let declared = u32::from_be_bytes(prefix) as usize;
    if declared > MAX_FRAME_SIZE {
        return Err(KvError::Framing(format!(
            "declared payload of {declared} bytes exceeds maximum {MAX_FRAME_SIZE}"
        )));
    }

    let mut payload = vec![0u8; declared];
    read_exact_framed(reader, &mut payload, "payload")?;

    decode(&payload)
}

// read_exact with short reads reported as framing faults rather than
// bare I/O errors
fn read_exact_framed<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            KvError::Framing(format!(
                "stream ended before {what} ({} bytes expected)",
                buf.len()
            ))
        } else {
            KvError::Io(e)
        }
    })
}

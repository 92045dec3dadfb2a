//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Wire Format
//!
//! The payload is always a UTF-8 JSON document.
//!
//! ### Request
//! ```text
//! {"type": "update" | "get" | "clear", "data": <object or null>}
//! ```
//!
//! ### Response (only for `get`)
//! ```text
//! <object>    -- the entire store contents
//! ```
//!
//! ### Stream framing
//! ```text
//! ┌────────────────┬──────────────────────────────┐
//! │ Length (4, BE) │  JSON payload (Length bytes) │
//! └────────────────┴──────────────────────────────┘
//! ```
//!
//! ### Datagram framing
//! None. One message per datagram, at most [`MAX_DATAGRAM_SIZE`] bytes.

mod codec;
mod request;

pub use codec::{
    decode, encode, read_frame, write_frame, LEN_PREFIX_SIZE, MAX_DATAGRAM_SIZE, MAX_FRAME_SIZE,
};
pub use request::{Request, RequestKind};

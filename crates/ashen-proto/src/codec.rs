//! Versioned binary codec for protocol messages.
//!
//! Every payload on the wire is a leading version byte followed by a
//! postcard-encoded body:
//!
//! ```text
//! +--------------------+------------------------+
//! | version (1 byte)   |  postcard body         |
//! +--------------------+------------------------+
//! ```
//!
//! [`encode`] and [`decode`] are generic over the payload type because the
//! request, response, and push envelopes all share this format. A relayed
//! "opaque pre-encoded message" is exactly a buffer in this format,
//! forwarded without being decoded.

use serde::{Serialize, de::DeserializeOwned};

/// Current wire version. Prepended to every encoded payload.
pub const WIRE_VERSION: u8 = 1;

/// Errors that can occur while decoding a wire payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload was empty (no version byte).
    #[error("empty payload — no version byte")]
    EmptyPayload,

    /// The version byte does not match [`WIRE_VERSION`].
    #[error("unsupported wire version: {0}")]
    UnsupportedVersion(u8),

    /// Postcard deserialization failed.
    #[error("deserialization error: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Encode a payload into a versioned binary buffer.
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, postcard::Error> {
    let body = postcard::to_allocvec(msg)?;
    let mut out = Vec::with_capacity(1 + body.len());
    out.push(WIRE_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode a versioned binary buffer into a payload.
///
/// Returns an error if the buffer is empty, the version byte is
/// unsupported, or the body is malformed.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, CodecError> {
    if data.is_empty() {
        return Err(CodecError::EmptyPayload);
    }

    let version = data[0];
    if version != WIRE_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let msg = postcard::from_bytes(&data[1..])?;
    Ok(msg)
}

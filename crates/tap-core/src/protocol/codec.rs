//! Binary codec for encoding and decoding Tap-Over-IP input event payloads.
//!
//! Wire formats (all multi-byte integers big-endian):
//! ```text
//! pointer event: [kind:1][mask:4][x:4][y:4]            13 bytes
//! key event:     [flags:1][code:4]                      5 bytes
//! ```
//! Both payloads are fixed-size; trailing bytes are a decode error so a
//! framing bug upstream cannot silently smuggle data past the decoder.

use thiserror::Error;

use crate::protocol::messages::{ChannelKind, KeyEventMessage, PointerEventMessage};

/// Encoded size of a pointer event payload in bytes.
pub const POINTER_EVENT_SIZE: usize = 13;

/// Encoded size of a key event payload in bytes.
pub const KEY_EVENT_SIZE: usize = 5;

/// Bit assignments of the key event flags byte.
pub mod key_flags {
    /// Discrete tap: host injects down then up.
    pub const PRESS: u8 = 1 << 0;
    /// Direction bit for non-tap events (set = down).
    pub const DOWN: u8 = 1 << 1;
    /// Event belongs to the sequence (IME text) path.
    pub const SEQUENCE: u8 = 1 << 2;
    /// Event belongs to the unicode path.
    pub const UNICODE: u8 = 1 << 3;
    /// Bits that must be zero in the current protocol version.
    pub const RESERVED: u8 = !(PRESS | DOWN | SEQUENCE | UNICODE);
}

/// Errors that can occur during payload encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the payload requires.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The channel kind byte is not a recognized value.
    #[error("unknown channel kind: 0x{0:02X}")]
    UnknownChannelKind(u8),

    /// The payload could not be parsed (reserved bits set, value out of range).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Extra bytes follow a complete payload.
    #[error("trailing bytes after payload: expected {expected} bytes, got {actual}")]
    TrailingData { expected: usize, actual: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`PointerEventMessage`] into its 13-byte wire form.
///
/// # Examples
///
/// ```rust
/// use tap_core::protocol::{decode_pointer_event, encode_pointer_event};
/// use tap_core::protocol::messages::{mouse_mask, ChannelKind, PointerEventMessage};
///
/// let msg = PointerEventMessage {
///     kind: ChannelKind::Mouse,
///     mask: mouse_mask::LEFT_DOWN,
///     x: 100,
///     y: 200,
/// };
/// let bytes = encode_pointer_event(&msg);
/// assert_eq!(decode_pointer_event(&bytes).unwrap(), msg);
/// ```
pub fn encode_pointer_event(msg: &PointerEventMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(POINTER_EVENT_SIZE);
    buf.push(msg.kind as u8);
    buf.extend_from_slice(&msg.mask.to_be_bytes());
    buf.extend_from_slice(&msg.x.to_be_bytes());
    buf.extend_from_slice(&msg.y.to_be_bytes());
    buf
}

/// Decodes a [`PointerEventMessage`] from exactly one wire payload.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the slice is too short, too long, or the
/// channel kind byte is unknown.
pub fn decode_pointer_event(bytes: &[u8]) -> Result<PointerEventMessage, ProtocolError> {
    require_exact(bytes, POINTER_EVENT_SIZE)?;
    let kind = ChannelKind::try_from(bytes[0])
        .map_err(|_| ProtocolError::UnknownChannelKind(bytes[0]))?;
    Ok(PointerEventMessage {
        kind,
        mask: read_i32(bytes, 1),
        x: read_i32(bytes, 5),
        y: read_i32(bytes, 9),
    })
}

/// Encodes a [`KeyEventMessage`] into its 5-byte wire form.
///
/// # Examples
///
/// ```rust
/// use tap_core::protocol::{decode_key_event, encode_key_event};
/// use tap_core::protocol::messages::{control_key, KeyEventMessage};
///
/// let msg = KeyEventMessage {
///     code: control_key::RETURN,
///     press: true,
///     down: false,
///     sequence: false,
///     unicode: false,
/// };
/// let bytes = encode_key_event(&msg);
/// assert_eq!(decode_key_event(&bytes).unwrap(), msg);
/// ```
pub fn encode_key_event(msg: &KeyEventMessage) -> Vec<u8> {
    let mut flags = 0u8;
    if msg.press {
        flags |= key_flags::PRESS;
    }
    if msg.down {
        flags |= key_flags::DOWN;
    }
    if msg.sequence {
        flags |= key_flags::SEQUENCE;
    }
    if msg.unicode {
        flags |= key_flags::UNICODE;
    }

    let mut buf = Vec::with_capacity(KEY_EVENT_SIZE);
    buf.push(flags);
    buf.extend_from_slice(&msg.code.to_be_bytes());
    buf
}

/// Decodes a [`KeyEventMessage`] from exactly one wire payload.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the slice is too short, too long, or any
/// reserved flag bit is set.
pub fn decode_key_event(bytes: &[u8]) -> Result<KeyEventMessage, ProtocolError> {
    require_exact(bytes, KEY_EVENT_SIZE)?;
    let flags = bytes[0];
    if flags & key_flags::RESERVED != 0 {
        return Err(ProtocolError::MalformedPayload(format!(
            "reserved key flag bits set: 0x{flags:02X}"
        )));
    }
    Ok(KeyEventMessage {
        code: read_u32(bytes, 1),
        press: flags & key_flags::PRESS != 0,
        down: flags & key_flags::DOWN != 0,
        sequence: flags & key_flags::SEQUENCE != 0,
        unicode: flags & key_flags::UNICODE != 0,
    })
}

// ── Read helpers ──────────────────────────────────────────────────────────────

/// Validates that `buf` holds exactly `needed` bytes.
fn require_exact(buf: &[u8], needed: usize) -> Result<(), ProtocolError> {
    if buf.len() < needed {
        return Err(ProtocolError::InsufficientData {
            needed,
            available: buf.len(),
        });
    }
    if buf.len() > needed {
        return Err(ProtocolError::TrailingData {
            expected: needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Reads a big-endian i32; the caller has already validated the length.
fn read_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Reads a big-endian u32; the caller has already validated the length.
fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Protocol module containing input event messages and the binary codec.

pub mod codec;
pub mod messages;

pub use codec::{
    decode_key_event, decode_pointer_event, encode_key_event, encode_pointer_event, ProtocolError,
};
pub use messages::*;

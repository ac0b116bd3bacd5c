//! # tap-core
//!
//! Shared library for Tap-Over-IP containing the input-event protocol model,
//! the wire codec, the coordinate-transform domain, and the key code
//! translation table.
//!
//! This crate is used by the host-side injector and by any tooling that needs
//! to speak the input protocol. It has zero dependencies on OS APIs, async
//! runtimes, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! Tap-Over-IP lets a controlling peer drive a host device's screen and keys
//! over the network. The controller captures user interactions, encodes them
//! as compact pointer/key event messages, and ships them to the host. The
//! host replays each message as synthetic input so the device behaves as if a
//! local user were touching it.
//!
//! This crate (`tap-core`) is the shared foundation. It defines:
//!
//! - **`protocol`** – The event messages as they appear on the wire: channel
//!   kinds (mouse-style vs. touch-style), pointer action masks, key event
//!   flags, and a compact big-endian codec for each payload.
//!
//! - **`domain`** – Pure logic with no OS dependencies: the shared
//!   remote-to-local coordinate scale and the low-level injected-event value
//!   the host hands to its platform injection primitive.
//!
//! - **`keymap`** – The translation table that converts protocol control-key
//!   codes into the numeric key codes the host platform understands.

// Declare the three top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/protocol/mod.rs).
pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `tap_core::PointerEventMessage` instead of the full module path.
pub use domain::injected::{InjectedEvent, KeyDirection, MotionAction};
pub use domain::transform::ScreenScale;
pub use protocol::codec::{
    decode_key_event, decode_pointer_event, encode_key_event, encode_pointer_event, ProtocolError,
};
pub use protocol::messages::{
    ChannelKind, KeyEventMessage, MouseAction, PointerEventMessage, TouchAction,
};

//! Key code translation tables.
//!
//! The wire carries protocol control-key codes (see
//! [`crate::protocol::messages::control_key`]); the host platform wants its
//! own numeric key codes. This module holds the per-platform tables. Only
//! the Android-style table ships today; other platforms slot in as sibling
//! modules with the same shape.

pub mod android;

pub use android::control_key_to_keycode;

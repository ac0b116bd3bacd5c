//! Application layer use cases for the host.
//!
//! # How the pieces fit together
//!
//! - **`dispatch_input`** – The entry point. Validates the injection
//!   capability, routes each pointer/key message by channel kind and action
//!   code, and owns the per-channel contact state. Collaborator seams
//!   (capability gate, raw injector, key table) are traits defined here and
//!   implemented in the infrastructure layer.
//!
//! - **`gestures`** – Composes multi-step injected sequences for the
//!   interactions the wire protocol encodes as single discrete codes:
//!   long-press, wheel swipe, the wheel-button timer race, and key taps.
//!
//! - **`scheduler`** – The single-slot delayed-action facility the gesture
//!   emulator defers work through, plus the monotonic uptime clock that
//!   stamps every injected event.

pub mod dispatch_input;
pub mod gestures;
pub mod scheduler;

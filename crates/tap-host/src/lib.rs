//! tap-host library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/` and
//! embedding applications share the same module tree.
//!
//! # What does tap-host do? (for beginners)
//!
//! The *host* is the device being controlled remotely. A transport layer
//! (outside this crate) receives pointer and key event messages from the
//! controlling peer and hands them to the [`InputDispatcher`] here. The
//! dispatcher turns each message into zero or more low-level injected events
//! so the device reacts as if a local user were touching its screen.
//!
//! Most messages map one-to-one onto an injected event, but the interesting
//! ones do not: the wire says "right button released" and the host must play
//! back a long-press; the wire says "wheel notch" and the host must perform a
//! small three-step swipe; the wire says "wheel button down / up" and the
//! host must race a timer to decide between two different key taps. That
//! gesture emulation, and the per-channel contact state it needs, is the
//! whole job of this crate.
//!
//! The actual OS injection call sits behind the [`RawEventInjector`] trait;
//! an in-memory recording implementation ships in [`infrastructure`] for
//! tests and demos.

/// Application layer: dispatcher, gesture emulation, delayed-action scheduling.
pub mod application;

/// Infrastructure layer: injector implementations, key table adapter, settings.
pub mod infrastructure;

pub use application::dispatch_input::{
    InjectCapability, InjectError, InputDispatcher, KeyCodeLookup, RawEventInjector,
};
pub use application::gestures::{GestureEmulator, GestureTiming};
pub use application::scheduler::{DelayedActionSlot, Uptime};
pub use infrastructure::injection::mock::{MockEventInjector, StaticCapability};
pub use infrastructure::keymap::AndroidKeymap;
pub use infrastructure::settings::{InjectorSettings, SettingsError};

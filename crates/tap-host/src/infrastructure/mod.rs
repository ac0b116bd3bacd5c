//! Infrastructure layer for the host.
//!
//! Contains the concrete implementations behind the application layer's
//! seams: event injector backends, the Android key table adapter, and the
//! settings file loader.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tap_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`injection`** – implementations of `RawEventInjector` and
//!   `InjectCapability`. The in-memory recording injector used by tests and
//!   demos lives here; real OS backends are supplied by the embedding
//!   application.
//!
//! - **`keymap`** – `KeyCodeLookup` adapter over the Android key code table.
//!
//! - **`settings`** – TOML-backed gesture timing and coordinate scale
//!   settings.

pub mod injection;
pub mod keymap;
pub mod settings;

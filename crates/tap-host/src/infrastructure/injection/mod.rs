//! Event injector backends.
//!
//! The application layer talks to the OS through the `RawEventInjector`
//! trait. This crate ships only the in-memory recording implementation; a
//! real deployment wires in a platform backend (on Android, a binding to the
//! system input manager) from the embedding application.

pub mod mock;

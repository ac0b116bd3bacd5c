//! Domain types for Tap-Over-IP.
//!
//! Pure logic with no infrastructure dependencies: the shared coordinate
//! scale between remote and local screen space, and the low-level injected
//! event value handed to the platform injection primitive. Everything here
//! compiles and tests on any platform without external setup.

pub mod injected;
pub mod transform;

//! The low-level event value handed to the platform injection primitive.
//!
//! Every gesture the host emulates ultimately reduces to a sequence of these
//! values. Timestamps are milliseconds on the host's monotonic uptime clock;
//! platform input validation cares about them, so the fields are explicit
//! rather than implied by "now" at injection time. In particular, all motion
//! events of one contact must carry the same `down_time_ms` origin.

use serde::{Deserialize, Serialize};

/// Motion event phase within a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionAction {
    Down,
    Move,
    Up,
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDirection {
    Down,
    Up,
}

/// Which input device class an injected event claims to originate from.
///
/// Hosts route injected events through device-specific validation, so the
/// source must match the event shape: motion claims the touchscreen, keys
/// claim the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    Touchscreen,
    Keyboard,
}

/// A fully-formed low-level input event ready for platform injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InjectedEvent {
    /// Synthetic touchscreen motion at a local-space position.
    Motion {
        action: MotionAction,
        x: f32,
        y: f32,
        /// Timestamp origin of the contact this event belongs to.
        down_time_ms: u64,
        /// When this particular event nominally happened.
        event_time_ms: u64,
    },
    /// Synthetic key press or release.
    Key {
        direction: KeyDirection,
        /// Platform key code, already translated from the protocol code.
        key_code: u32,
        down_time_ms: u64,
        event_time_ms: u64,
    },
}

impl InjectedEvent {
    /// Returns the device class this event must claim as its source.
    pub fn source(&self) -> EventSource {
        match self {
            InjectedEvent::Motion { .. } => EventSource::Touchscreen,
            InjectedEvent::Key { .. } => EventSource::Keyboard,
        }
    }
}

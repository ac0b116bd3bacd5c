//! All Tap-Over-IP input event message types.
//!
//! Pointer events travel as `(channel kind, action mask, x, y)` tuples; key
//! events travel as a flags byte plus a 32-bit control-key code. The numeric
//! values below are the wire values and must stay stable across versions.

use serde::{Deserialize, Serialize};

// ── Channel kinds ─────────────────────────────────────────────────────────────

/// Which pointer-like input stream an event belongs to.
///
/// The two channels keep independent position/contact state on the host:
/// a mouse-style stream of absolute positions and button codes, and a
/// touch-style stream of pan gestures carrying deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChannelKind {
    Touch = 0x00,
    Mouse = 0x01,
}

impl TryFrom<u8> for ChannelKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(ChannelKind::Touch),
            0x01 => Ok(ChannelKind::Mouse),
            _ => Err(()),
        }
    }
}

// ── Mouse action masks ────────────────────────────────────────────────────────

/// Wire values for the mouse channel's action mask.
///
/// A mask composes a button identifier and a phase: `(button << 3) | phase`,
/// where the phase occupies the low three bits (0 = move, 1 = down, 2 = up)
/// and the button identifiers are LEFT = 0x01, RIGHT = 0x02, WHEEL = 0x04,
/// BACK = 0x08. The wheel's scroll steps are carried as two pseudo-buttons
/// (0x05 scroll-down, 0x06 scroll-up) pressed for one step each.
pub mod mouse_mask {
    /// Plain cursor move with no button involved.
    pub const MOVE: i32 = 0;
    /// Cursor move while the left button is held (drag).
    pub const LEFT_MOVE: i32 = 8;
    pub const LEFT_DOWN: i32 = 9;
    pub const LEFT_UP: i32 = 10;
    /// Right-button release; the host emulates it as a long-press.
    pub const RIGHT_UP: i32 = 18;
    pub const WHEEL_BUTTON_DOWN: i32 = 33;
    pub const WHEEL_BUTTON_UP: i32 = 34;
    /// One wheel notch scrolling content downward.
    pub const WHEEL_DOWN: i32 = 41;
    /// One wheel notch scrolling content upward.
    pub const WHEEL_UP: i32 = 49;
    /// Back-button release; the host emulates it as a back key tap.
    pub const BACK_UP: i32 = 66;
}

/// Decoded mouse channel action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseAction {
    /// Cursor (or drag) movement to an absolute position.
    Move,
    LeftDown,
    LeftUp,
    RightUp,
    BackUp,
    WheelButtonDown,
    WheelButtonUp,
    WheelDown,
    WheelUp,
}

impl MouseAction {
    /// Decodes a wire action mask into a [`MouseAction`].
    ///
    /// Both the bare `MOVE` mask and `LEFT_MOVE` decode to [`MouseAction::Move`]:
    /// controllers send the latter while the left button is held, but the host
    /// derives drag-vs-hover from its own contact state, not from the mask.
    ///
    /// Returns `None` for masks this protocol does not define (for example a
    /// right-button down, which controllers never send).
    pub fn from_mask(mask: i32) -> Option<MouseAction> {
        match mask {
            mouse_mask::MOVE | mouse_mask::LEFT_MOVE => Some(MouseAction::Move),
            mouse_mask::LEFT_DOWN => Some(MouseAction::LeftDown),
            mouse_mask::LEFT_UP => Some(MouseAction::LeftUp),
            mouse_mask::RIGHT_UP => Some(MouseAction::RightUp),
            mouse_mask::WHEEL_BUTTON_DOWN => Some(MouseAction::WheelButtonDown),
            mouse_mask::WHEEL_BUTTON_UP => Some(MouseAction::WheelButtonUp),
            mouse_mask::WHEEL_DOWN => Some(MouseAction::WheelDown),
            mouse_mask::WHEEL_UP => Some(MouseAction::WheelUp),
            mouse_mask::BACK_UP => Some(MouseAction::BackUp),
            _ => None,
        }
    }
}

// ── Touch action codes ────────────────────────────────────────────────────────

/// Wire values for the touch channel's action code.
///
/// Codes 1–3 are the two-finger scale gesture (begin/update/end); the host
/// does not emulate pinch-zoom, so they are not decoded here and are reported
/// back to the controller as unsupported.
pub mod touch_code {
    pub const SCALE_START: i32 = 1;
    pub const SCALE_UPDATE: i32 = 2;
    pub const SCALE_END: i32 = 3;
    pub const PAN_START: i32 = 4;
    pub const PAN_UPDATE: i32 = 5;
    pub const PAN_END: i32 = 6;
}

/// Decoded touch channel action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchAction {
    /// Finger down at an absolute position.
    PanStart,
    /// Finger moved; the event carries deltas, not absolutes.
    PanUpdate,
    /// Finger lifted; the event carries the absolute resync position.
    PanEnd,
}

impl TouchAction {
    /// Decodes a wire action code into a [`TouchAction`].
    ///
    /// Returns `None` for the scale-gesture codes and anything undefined.
    pub fn from_code(code: i32) -> Option<TouchAction> {
        match code {
            touch_code::PAN_START => Some(TouchAction::PanStart),
            touch_code::PAN_UPDATE => Some(TouchAction::PanUpdate),
            touch_code::PAN_END => Some(TouchAction::PanEnd),
            _ => None,
        }
    }
}

// ── Control key codes ─────────────────────────────────────────────────────────

/// Protocol-level control-key codes carried in [`KeyEventMessage::code`].
///
/// These are the keys the protocol can name directly; printable text travels
/// through the unicode/sequence path instead and never reaches this code
/// space. Code 0 is reserved for "unknown" so that a zeroed payload can never
/// alias a real key.
pub mod control_key {
    pub const UNKNOWN: u32 = 0;
    pub const ALT: u32 = 1;
    pub const BACKSPACE: u32 = 2;
    pub const CAPS_LOCK: u32 = 3;
    pub const CONTROL: u32 = 4;
    pub const DELETE: u32 = 5;
    pub const DOWN_ARROW: u32 = 6;
    pub const END: u32 = 7;
    pub const ESCAPE: u32 = 8;
    pub const F1: u32 = 9;
    pub const F2: u32 = 10;
    pub const F3: u32 = 11;
    pub const F4: u32 = 12;
    pub const F5: u32 = 13;
    pub const F6: u32 = 14;
    pub const F7: u32 = 15;
    pub const F8: u32 = 16;
    pub const F9: u32 = 17;
    pub const F10: u32 = 18;
    pub const F11: u32 = 19;
    pub const F12: u32 = 20;
    pub const HOME: u32 = 21;
    pub const INSERT: u32 = 22;
    pub const LEFT_ARROW: u32 = 23;
    pub const META: u32 = 24;
    pub const PAGE_DOWN: u32 = 25;
    pub const PAGE_UP: u32 = 26;
    pub const RETURN: u32 = 27;
    pub const RIGHT_ARROW: u32 = 28;
    pub const SHIFT: u32 = 29;
    pub const SPACE: u32 = 30;
    pub const TAB: u32 = 31;
    pub const UP_ARROW: u32 = 32;
    pub const VOLUME_DOWN: u32 = 33;
    pub const VOLUME_UP: u32 = 34;
    pub const VOLUME_MUTE: u32 = 35;
    pub const POWER: u32 = 36;
}

// ── Event messages ────────────────────────────────────────────────────────────

/// A pointer event as delivered by the transport layer.
///
/// `x`/`y` are remote-space absolute coordinates, except for
/// [`TouchAction::PanUpdate`] where they are signed deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEventMessage {
    /// Which channel's state this event drives.
    pub kind: ChannelKind,
    /// Raw action mask; see [`mouse_mask`] and [`touch_code`].
    pub mask: i32,
    pub x: i32,
    pub y: i32,
}

/// A key event as delivered by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEventMessage {
    /// Control-key code; see [`control_key`].
    pub code: u32,
    /// Set for a discrete tap: the host injects a matching key-up right after
    /// the key-down.
    pub press: bool,
    /// Direction for non-tap events: `true` = key-down, `false` = key-up.
    pub down: bool,
    /// Marker: the event belongs to the sequence (IME text) path.
    pub sequence: bool,
    /// Marker: the event belongs to the unicode path.
    pub unicode: bool,
}

impl KeyEventMessage {
    /// Returns `true` when the event belongs to the unicode/sequence text
    /// path and must not be injected through the key-code path.
    pub fn is_text_path(&self) -> bool {
        self.sequence || self.unicode
    }
}

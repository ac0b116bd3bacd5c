//! Protocol control-key code to Android key code translation.
//!
//! Reference: `android.view.KeyEvent` KEYCODE_* constants. The numeric
//! values below are fixed by the platform and must not be renumbered.
//!
//! Two details worth knowing:
//!
//! - `KEYCODE_UNKNOWN` is 0, so "no mapping" and "key code zero" collapse
//!   into the same value; callers treat 0 as not injectable.
//! - The protocol's HOME control key is the *keyboard* Home key
//!   (`KEYCODE_MOVE_HOME`), not the device's home button (`KEYCODE_HOME`);
//!   the latter only appears as the short-action of the wheel-button
//!   gesture.

use crate::protocol::messages::control_key;

// ── Android key code constants ────────────────────────────────────────────────

pub const KEYCODE_UNKNOWN: u32 = 0;
pub const KEYCODE_HOME: u32 = 3;
pub const KEYCODE_BACK: u32 = 4;
pub const KEYCODE_DPAD_UP: u32 = 19;
pub const KEYCODE_DPAD_DOWN: u32 = 20;
pub const KEYCODE_DPAD_LEFT: u32 = 21;
pub const KEYCODE_DPAD_RIGHT: u32 = 22;
pub const KEYCODE_VOLUME_UP: u32 = 24;
pub const KEYCODE_VOLUME_DOWN: u32 = 25;
pub const KEYCODE_POWER: u32 = 26;
pub const KEYCODE_ALT_LEFT: u32 = 57;
pub const KEYCODE_SHIFT_LEFT: u32 = 59;
pub const KEYCODE_TAB: u32 = 61;
pub const KEYCODE_SPACE: u32 = 62;
pub const KEYCODE_ENTER: u32 = 66;
pub const KEYCODE_DEL: u32 = 67;
pub const KEYCODE_PAGE_UP: u32 = 92;
pub const KEYCODE_PAGE_DOWN: u32 = 93;
pub const KEYCODE_ESCAPE: u32 = 111;
pub const KEYCODE_FORWARD_DEL: u32 = 112;
pub const KEYCODE_CTRL_LEFT: u32 = 113;
pub const KEYCODE_CAPS_LOCK: u32 = 115;
pub const KEYCODE_META_LEFT: u32 = 117;
pub const KEYCODE_MOVE_HOME: u32 = 122;
pub const KEYCODE_MOVE_END: u32 = 123;
pub const KEYCODE_INSERT: u32 = 124;
pub const KEYCODE_F1: u32 = 131;
pub const KEYCODE_F2: u32 = 132;
pub const KEYCODE_F3: u32 = 133;
pub const KEYCODE_F4: u32 = 134;
pub const KEYCODE_F5: u32 = 135;
pub const KEYCODE_F6: u32 = 136;
pub const KEYCODE_F7: u32 = 137;
pub const KEYCODE_F8: u32 = 138;
pub const KEYCODE_F9: u32 = 139;
pub const KEYCODE_F10: u32 = 140;
pub const KEYCODE_F11: u32 = 141;
pub const KEYCODE_F12: u32 = 142;
pub const KEYCODE_VOLUME_MUTE: u32 = 164;
pub const KEYCODE_APP_SWITCH: u32 = 187;

// ── Translation ───────────────────────────────────────────────────────────────

/// Translates a protocol control-key code to an Android key code.
///
/// Returns [`KEYCODE_UNKNOWN`] (0) for codes with no Android equivalent,
/// including [`control_key::UNKNOWN`] itself.
pub fn control_key_to_keycode(code: u32) -> u32 {
    match code {
        control_key::ALT => KEYCODE_ALT_LEFT,
        control_key::BACKSPACE => KEYCODE_DEL,
        control_key::CAPS_LOCK => KEYCODE_CAPS_LOCK,
        control_key::CONTROL => KEYCODE_CTRL_LEFT,
        control_key::DELETE => KEYCODE_FORWARD_DEL,
        control_key::DOWN_ARROW => KEYCODE_DPAD_DOWN,
        control_key::END => KEYCODE_MOVE_END,
        control_key::ESCAPE => KEYCODE_ESCAPE,
        control_key::F1 => KEYCODE_F1,
        control_key::F2 => KEYCODE_F2,
        control_key::F3 => KEYCODE_F3,
        control_key::F4 => KEYCODE_F4,
        control_key::F5 => KEYCODE_F5,
        control_key::F6 => KEYCODE_F6,
        control_key::F7 => KEYCODE_F7,
        control_key::F8 => KEYCODE_F8,
        control_key::F9 => KEYCODE_F9,
        control_key::F10 => KEYCODE_F10,
        control_key::F11 => KEYCODE_F11,
        control_key::F12 => KEYCODE_F12,
        control_key::HOME => KEYCODE_MOVE_HOME,
        control_key::INSERT => KEYCODE_INSERT,
        control_key::LEFT_ARROW => KEYCODE_DPAD_LEFT,
        control_key::META => KEYCODE_META_LEFT,
        control_key::PAGE_DOWN => KEYCODE_PAGE_DOWN,
        control_key::PAGE_UP => KEYCODE_PAGE_UP,
        control_key::RETURN => KEYCODE_ENTER,
        control_key::RIGHT_ARROW => KEYCODE_DPAD_RIGHT,
        control_key::SHIFT => KEYCODE_SHIFT_LEFT,
        control_key::SPACE => KEYCODE_SPACE,
        control_key::TAB => KEYCODE_TAB,
        control_key::UP_ARROW => KEYCODE_DPAD_UP,
        control_key::VOLUME_DOWN => KEYCODE_VOLUME_DOWN,
        control_key::VOLUME_UP => KEYCODE_VOLUME_UP,
        control_key::VOLUME_MUTE => KEYCODE_VOLUME_MUTE,
        control_key::POWER => KEYCODE_POWER,
        _ => KEYCODE_UNKNOWN,
    }
}

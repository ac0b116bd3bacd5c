//! Android key table adapter.

use tap_core::keymap::control_key_to_keycode;

use crate::application::dispatch_input::KeyCodeLookup;

/// [`KeyCodeLookup`] backed by the built-in Android key code table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidKeymap;

impl KeyCodeLookup for AndroidKeymap {
    fn platform_key_code(&self, code: u32) -> u32 {
        control_key_to_keycode(code)
    }
}

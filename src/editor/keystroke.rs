// src/editor/keystroke.rs

use crate::models::activity::{ActivityFlag, KeyEvent, KeystrokeVerdict};

/// Key codes treated as a proxy for the paste shortcut (page up / "4").
///
/// The heuristic over- and under-fires; it only drives an advisory notice.
pub const PASTE_SHORTCUT_KEY_CODES: [u32; 2] = [33, 52];

pub fn is_paste_shortcut(event: &KeyEvent) -> bool {
    PASTE_SHORTCUT_KEY_CODES.contains(&event.key_code) && (event.ctrl_key || event.meta_key)
}

/// Applies one key-down event to the current flag.
pub fn observe_keystroke(current: ActivityFlag, event: &KeyEvent) -> KeystrokeVerdict {
    if is_paste_shortcut(event) {
        return KeystrokeVerdict {
            prevent_default: true,
            activity: ActivityFlag::SuspiciousInputDetected,
        };
    }

    KeystrokeVerdict {
        prevent_default: false,
        activity: current,
    }
}

// src/models/activity.rs

use serde::{Deserialize, Serialize};

/// Advisory signal raised on a suspected paste shortcut.
///
/// Purely cosmetic: it drives a dismissible notice in the editor and is
/// never sent to the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFlag {
    #[default]
    None,
    SuspiciousInputDetected,
}

/// A key-down event as reported by the browser editor.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key_code: u32,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
}

/// Result of observing one key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeystrokeVerdict {
    /// The browser should suppress its default handling of the event.
    pub prevent_default: bool,
    pub activity: ActivityFlag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_reads_browser_field_names() {
        let event: KeyEvent =
            serde_json::from_str(r#"{"keyCode":52,"metaKey":true}"#).unwrap();
        assert_eq!(event.key_code, 52);
        assert!(event.meta_key);
        assert!(!event.ctrl_key);
    }

    #[test]
    fn flag_serializes_in_snake_case() {
        assert_eq!(
            serde_json::to_value(ActivityFlag::SuspiciousInputDetected).unwrap(),
            "suspicious_input_detected"
        );
    }
}

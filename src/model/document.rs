// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! The persisted document codec.
//!
//! One file holds one tab: its name, the background image as embedded PNG
//! bytes, and a map of buttons keyed by their scene position. The position
//! key is a compatibility constraint: two buttons at the identical
//! floating-point position collide and the earlier one is silently lost on
//! save. Decoding is tolerant — a missing name falls back to the file stem,
//! a missing or corrupt background or button entry is skipped with a
//! warning, never failing the whole document.

use super::{Background, Button, Payload, Rgb, Tab};
use crate::error::PickerError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One button as stored on disk. The position lives in the map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ButtonRecord {
    label: String,
    size: (f64, f64),
    opacity: f64,
    color: Rgb,
    payload: Payload,
}

impl ButtonRecord {
    fn from_button(button: &Button) -> Self {
        Self {
            label: button.label.clone(),
            size: button.scale(),
            opacity: button.opacity,
            color: button.color,
            payload: button.payload.clone(),
        }
    }

    fn into_button(self, position: Point) -> Button {
        let mut button = Button::new(self.label, self.payload);
        button.position = position;
        button.set_scale(self.size);
        button.opacity = self.opacity;
        button.color = self.color;
        button
    }
}

fn position_key(position: Point) -> String {
    format!("{},{}", position.x, position.y)
}

fn parse_position_key(key: &str) -> Option<Point> {
    let (x, y) = key.split_once(',')?;
    Some(Point::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
    ))
}

/// Serialize a tab to document bytes.
pub fn encode_tab(tab: &Tab) -> Result<Vec<u8>, PickerError> {
    let mut buttons = serde_json::Map::new();
    for button in &tab.buttons {
        let key = position_key(button.position);
        if buttons.contains_key(&key) {
            tracing::warn!(
                "Two buttons share position ({}); keeping only the topmost",
                key
            );
        }
        let record = ButtonRecord::from_button(button);
        let value = serde_json::to_value(&record)
            .map_err(|e| PickerError::Decode(e.to_string()))?;
        buttons.insert(key, value);
    }

    let doc = serde_json::json!({
        "name": tab.name,
        "bg": BASE64.encode(tab.background.encode_png()?),
        "buttons": buttons,
    });
    serde_json::to_vec_pretty(&doc).map_err(|e| PickerError::Decode(e.to_string()))
}

/// Deserialize document bytes into a fresh tab.
///
/// `fallback_name` (normally the file stem) is used when the document has
/// no `name` field.
pub fn decode_tab(bytes: &[u8], fallback_name: &str) -> Result<Tab, PickerError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| PickerError::Decode(e.to_string()))?;

    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(fallback_name);
    let mut tab = Tab::new(name);

    match value.get("bg").and_then(Value::as_str) {
        Some(encoded) => match decode_background(encoded) {
            Ok(background) => tab.set_background(background),
            Err(e) => tracing::warn!("Skipping unreadable background: {}", e),
        },
        None => tracing::debug!("Document has no background"),
    }

    if let Some(entries) = value.get("buttons").and_then(Value::as_object) {
        for (key, entry) in entries {
            let Some(position) = parse_position_key(key) else {
                tracing::warn!("Skipping button with malformed position key {:?}", key);
                continue;
            };
            match serde_json::from_value::<ButtonRecord>(entry.clone()) {
                Ok(record) => tab.buttons.push(record.into_button(position)),
                Err(e) => {
                    tracing::warn!("Skipping malformed button at ({}): {}", key, e);
                }
            }
        }
    }

    Ok(tab)
}

fn decode_background(encoded: &str) -> Result<Background, PickerError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| PickerError::ImageDecode(e.to_string()))?;
    Background::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptLanguage;
    use pretty_assertions::assert_eq;

    fn sample_tab() -> Tab {
        let mut tab = Tab::new("body");

        let mut a = Button::new_object("L1");
        a.position = Point::new(0.0, 0.0);
        a.set_scale((2.0, 2.0));
        a.opacity = 1.0;
        a.color = Rgb(225, 225, 0);
        a.payload = Payload::Objects(vec!["root|spine".to_string()]);
        tab.buttons.push(a);

        let mut b = Button::new_command("reset");
        b.position = Point::new(42.5, -7.25);
        b.opacity = 0.5;
        b.color = Rgb(0, 225, 255);
        b.payload = Payload::Command {
            language: ScriptLanguage::Python,
            text: "cmds.select('<ns>root')".to_string(),
        };
        tab.buttons.push(b);

        tab
    }

    #[test]
    fn roundtrip_preserves_every_button_field() {
        let tab = sample_tab();
        let bytes = encode_tab(&tab).unwrap();
        let loaded = decode_tab(&bytes, "fallback").unwrap();

        assert_eq!(loaded.name, "body");
        assert_eq!(loaded.buttons.len(), 2);

        // Entries come back keyed by position; find them rather than
        // assuming order.
        let a = loaded
            .buttons
            .iter()
            .find(|b| b.label == "L1")
            .expect("object button survives");
        assert_eq!(a.position, Point::new(0.0, 0.0));
        assert_eq!(a.scale(), (2.0, 2.0));
        assert_eq!(a.opacity, 1.0);
        assert_eq!(a.color, Rgb(225, 225, 0));
        assert_eq!(a.payload, Payload::Objects(vec!["root|spine".to_string()]));

        let b = loaded
            .buttons
            .iter()
            .find(|b| b.label == "reset")
            .expect("command button survives");
        assert_eq!(b.position, Point::new(42.5, -7.25));
        assert_eq!(b.opacity, 0.5);
        assert_eq!(
            b.payload,
            Payload::Command {
                language: ScriptLanguage::Python,
                text: "cmds.select('<ns>root')".to_string(),
            }
        );
    }

    #[test]
    fn save_then_load_scenario() {
        let mut tab = Tab::new("t");
        let mut button = Button::new_object("L1");
        button.position = Point::new(0.0, 0.0);
        button.set_scale((2.0, 2.0));
        button.opacity = 1.0;
        button.color = Rgb(225, 225, 0);
        tab.buttons.push(button);

        let bytes = encode_tab(&tab).unwrap();
        let loaded = decode_tab(&bytes, "t").unwrap();
        let b = &loaded.buttons[0];
        assert_eq!(b.label, "L1");
        assert_eq!(b.position, Point::new(0.0, 0.0));
        assert_eq!(b.scale(), (2.0, 2.0));
        assert_eq!(b.opacity, 1.0);
        assert_eq!(b.color, Rgb(225, 225, 0));
    }

    #[test]
    fn identical_positions_collide_and_last_wins() {
        let mut tab = Tab::new("t");
        let mut first = Button::new_object("first");
        first.position = Point::new(10.0, 10.0);
        let mut second = Button::new_object("second");
        second.position = Point::new(10.0, 10.0);
        tab.buttons.push(first);
        tab.buttons.push(second);

        let bytes = encode_tab(&tab).unwrap();
        let loaded = decode_tab(&bytes, "t").unwrap();
        assert_eq!(loaded.buttons.len(), 1);
        assert_eq!(loaded.buttons[0].label, "second");
    }

    #[test]
    fn missing_name_falls_back_to_file_stem() {
        let bytes = br#"{"buttons": {}}"#;
        let tab = decode_tab(bytes, "arm_rig").unwrap();
        assert_eq!(tab.name, "arm_rig");
    }

    #[test]
    fn corrupt_background_is_skipped_not_fatal() {
        let bytes = br#"{"name": "t", "bg": "not base64!", "buttons": {}}"#;
        let tab = decode_tab(bytes, "t").unwrap();
        assert_eq!(tab.name, "t");
    }

    #[test]
    fn malformed_button_entry_is_skipped() {
        let bytes = br#"{
            "name": "t",
            "buttons": {
                "0,0": {"label": "ok", "size": [1.0, 1.0], "opacity": 1.0,
                         "color": [225, 225, 0], "payload": {"objects": []}},
                "5,5": {"label": "broken"},
                "bad-key": {"label": "ok", "size": [1.0, 1.0], "opacity": 1.0,
                         "color": [225, 225, 0], "payload": {"objects": []}}
            }
        }"#;
        let tab = decode_tab(bytes, "t").unwrap();
        assert_eq!(tab.buttons.len(), 1);
        assert_eq!(tab.buttons[0].label, "ok");
    }

    #[test]
    fn unparseable_document_is_an_error() {
        let err = decode_tab(b"not json", "t").unwrap_err();
        assert!(matches!(err, PickerError::Decode(_)));
    }

    #[test]
    fn payload_variant_tags_are_explicit() {
        let object = serde_json::to_value(Payload::Objects(vec!["a|b".into()])).unwrap();
        assert_eq!(object, serde_json::json!({"objects": ["a|b"]}));

        let command = serde_json::to_value(Payload::Command {
            language: ScriptLanguage::Mel,
            text: "select -r <ns>ctl;".into(),
        })
        .unwrap();
        assert_eq!(
            command,
            serde_json::json!({"command": {"language": "mel", "text": "select -r <ns>ctl;"}})
        );
    }
}

// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Picker buttons.
//!
//! A button is a clickable shape on the canvas bound either to a set of
//! scene objects (selecting the button selects them) or to an embedded
//! script (selecting the button runs it). Object buttons draw as rectangles,
//! command buttons as ellipses; both carry a child label item that
//! hit-tests back to its owner.

use super::{ButtonId, namespace};
use crate::host::ScriptLanguage;
use crate::settings::MAX_TOOLTIP_OBJS;
use crate::theme;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// An RGB color triple. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The HSV value component (the brightest channel), used to pick a
    /// contrasting label color.
    pub fn value(self) -> u8 {
        self.0.max(self.1).max(self.2)
    }
}

/// What a button does when selected.
///
/// The variant tag is explicit in the serialized form; readers never have to
/// infer it from the payload's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    /// Namespace-relative object paths to re-select in the host.
    Objects(Vec<String>),
    /// An opaque script with `<ns>` placeholders where namespace-qualified
    /// names appeared.
    Command { language: ScriptLanguage, text: String },
}

impl Payload {
    /// An empty Mel command, the state of a freshly created command button
    /// before its first bind.
    pub fn empty_command() -> Self {
        Self::Command {
            language: ScriptLanguage::Mel,
            text: String::new(),
        }
    }
}

/// A picker button. Geometry is always in the owning tab's scene
/// coordinates; `position` is the top-left corner of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub position: Point,
    pub label: String,
    /// (x, y) scale of the body, rounded to one decimal on every write.
    scale: (f64, f64),
    pub opacity: f64,
    pub color: Rgb,
    pub selected: bool,
    pub payload: Payload,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: ButtonId::next(),
            position: Point::ZERO,
            label: label.into(),
            scale: (1.0, 1.0),
            opacity: 1.0,
            color: theme::DEFAULT_COLOR,
            selected: false,
            payload,
        }
    }

    /// An object button bound to nothing yet.
    pub fn new_object(label: impl Into<String>) -> Self {
        Self::new(label, Payload::Objects(Vec::new()))
    }

    /// A command button with an empty command.
    pub fn new_command(label: impl Into<String>) -> Self {
        Self::new(label, Payload::empty_command())
    }

    pub fn is_command(&self) -> bool {
        matches!(self.payload, Payload::Command { .. })
    }

    // ========================================================================
    // BINDING
    // ========================================================================

    /// Bind this button to the given host selection (full scene paths).
    ///
    /// Each path is stored namespace-relative so the layout can be reused
    /// under a different active namespace. Turns the button into an object
    /// button.
    pub fn bind_objects(&mut self, selection: &[String]) {
        let objs = selection.iter().map(|p| namespace::strip_path(p)).collect();
        self.payload = Payload::Objects(objs);
    }

    /// Bind this button to a user-entered script, rewriting namespace
    /// qualifiers to the `<ns>` placeholder. Turns the button into a
    /// command button.
    pub fn bind_command(&mut self, text: &str, language: ScriptLanguage) {
        self.payload = Payload::Command {
            language,
            text: namespace::rewrite_command(text, language),
        };
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    /// Unscaled body size. Labeled buttons grow horizontally to fit the
    /// label; unlabeled buttons are a fixed square cell.
    fn base_size(&self) -> Size {
        let width = if self.label.is_empty() {
            theme::BUTTON_SIZE
        } else {
            self.label.chars().count() as f64 * theme::LABEL_ADVANCE
        };
        Size::new(width, theme::BUTTON_SIZE)
    }

    /// Scaled body size in scene units.
    pub fn body_size(&self) -> Size {
        let base = self.base_size();
        Size::new(base.width * self.scale.0, base.height * self.scale.1)
    }

    /// The body rectangle in scene coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.body_size())
    }

    /// The child label rectangle in scene coordinates. The label sits
    /// slightly up and left of the body, so it extends past the bounds.
    pub fn label_bounds(&self) -> Rect {
        let offset = Vec2::new(
            theme::LABEL_OFFSET_X * self.scale.0,
            theme::LABEL_OFFSET_Y * self.scale.1,
        );
        Rect::from_origin_size(self.position + offset, self.body_size())
    }

    /// Center of the body in scene coordinates.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Hit-test the body only. Command buttons are ellipses inscribed in
    /// their bounds; object buttons are the full rectangle.
    pub fn hit_body(&self, point: Point) -> bool {
        let bounds = self.bounds();
        if !self.is_command() {
            return bounds.contains(point);
        }
        let rx = bounds.width() / 2.0;
        let ry = bounds.height() / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let center = bounds.center();
        let dx = (point.x - center.x) / rx;
        let dy = (point.y - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }

    /// Hit-test the body or the child label. A label hit resolves to the
    /// owning button.
    pub fn hit(&self, point: Point) -> bool {
        self.hit_body(point) || (!self.label.is_empty() && self.label_bounds().contains(point))
    }

    // ========================================================================
    // ATTRIBUTES
    // ========================================================================

    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// Set the body scale, rounded to one decimal place per axis.
    pub fn set_scale(&mut self, scale: (f64, f64)) {
        self.scale = (round1(scale.0), round1(scale.1));
    }

    /// The label color contrasting with the current fill. The darkness
    /// threshold differs between the two button shapes.
    pub fn label_color(&self) -> Rgb {
        let threshold = if self.is_command() {
            theme::LABEL_DARK_THRESHOLD_COMMAND
        } else {
            theme::LABEL_DARK_THRESHOLD_OBJECT
        };
        theme::label_color(self.color, threshold)
    }

    /// Tooltip text: bound object short names for object buttons (capped,
    /// with an elision tail), the stored command for command buttons.
    pub fn tooltip(&self) -> String {
        match &self.payload {
            Payload::Command { text, .. } => text.clone(),
            Payload::Objects(objs) => {
                if objs.is_empty() {
                    return String::new();
                }
                let mut short: Vec<String> = objs
                    .iter()
                    .map(|o| o.rsplit('|').next().unwrap_or(o).to_string())
                    .collect();
                if short.len() > MAX_TOOLTIP_OBJS {
                    let extra = short.len() - MAX_TOOLTIP_OBJS;
                    short.truncate(MAX_TOOLTIP_OBJS - 1);
                    short.push(format!("and {extra} more..."));
                }
                short.join("\n")
            }
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

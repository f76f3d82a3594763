// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Button palette and canvas appearance constants.
//!
//! All colors are plain RGB triples; the host decides how to rasterize them.
//! Non-visual tuning knobs (zoom, undo depth, nudge) live in `settings.rs`.

use crate::model::Rgb;

// ============================================================================
// BUTTON PALETTE -- The custom colors offered by the host's color dialog
// ============================================================================
pub const YELLOW: Rgb = Rgb(225, 225, 0);
pub const RED: Rgb = Rgb(225, 0, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const LIGHT_BLUE: Rgb = Rgb(0, 225, 255);
pub const GREEN: Rgb = Rgb(0, 225, 0);
pub const PURPLE: Rgb = Rgb(177, 0, 255);
pub const ORANGE: Rgb = Rgb(255, 87, 0);
pub const BROWN: Rgb = Rgb(80, 50, 0);
pub const PINK: Rgb = Rgb(236, 177, 177);
pub const GRAY: Rgb = Rgb(87, 87, 87);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Fill color for freshly created buttons.
pub const DEFAULT_COLOR: Rgb = YELLOW;

/// Fill color for buttons that display as selected.
pub const HIGHLIGHT_COLOR: Rgb = Rgb(225, 225, 225);

/// Ordered palette as presented in the host's custom-color slots.
pub const CUSTOM_COLORS: [Rgb; 10] = [
    YELLOW, RED, BLUE, LIGHT_BLUE, GREEN, PURPLE, ORANGE, BROWN, PINK, GRAY,
];

// ============================================================================
// BUTTON GEOMETRY
// ============================================================================
/// Side length of an unlabeled button cell, in scene units.
pub const BUTTON_SIZE: f64 = 15.0;

/// Horizontal advance per label character, in scene units.
///
/// Labels are modeled as a fixed-pitch bitmap font, so the body of a labeled
/// button is simply `len * LABEL_ADVANCE` wide.
pub const LABEL_ADVANCE: f64 = 8.0;

/// Offset of the child label item from the button origin.
pub const LABEL_OFFSET_X: f64 = -1.0;
pub const LABEL_OFFSET_Y: f64 = -5.4;

// ============================================================================
// LABEL CONTRAST
// ============================================================================
// Object buttons and command buttons flip to white lettering at different
// darkness levels; both thresholds come from the shipped behavior.

/// Object buttons use black lettering above this HSV value.
pub const LABEL_DARK_THRESHOLD_OBJECT: u8 = 80;

/// Command buttons use black lettering above this HSV value.
pub const LABEL_DARK_THRESHOLD_COMMAND: u8 = 128;

// ============================================================================
// BACKGROUND
// ============================================================================
/// Fill color of the synthesized default background panel.
pub const DEFAULT_BG_COLOR: Rgb = Rgb(0x28, 0x28, 0x28);

/// Pick the label color (black or white) that contrasts with `fill`.
pub fn label_color(fill: Rgb, dark_threshold: u8) -> Rgb {
    if fill.value() <= dark_threshold {
        WHITE
    } else {
        BLACK
    }
}

// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Non-visual editor settings.
//!
//! These stay stable across theme changes. Visual styling (colors, sizes)
//! belongs in `theme.rs`.

// ============================================================================
// VIEWPORT SETTINGS
// ============================================================================
/// Zoom factor applied per zoom event (5% in or out).
pub const ZOOM_STEP: f64 = 0.05;

/// Zoom floor. At or below this scale the view recenters on the scene
/// instead of shrinking further.
pub const MIN_ZOOM: f64 = 0.168261435398;

/// Extra zoom-out applied after framing the current selection.
pub const FRAME_SELECTED_ZOOM: f64 = 0.5;

// ============================================================================
// UNDO SETTINGS
// ============================================================================
/// Maximum number of undoable edits retained per tab.
pub const UNDO_LIMIT: usize = 100;

// ============================================================================
// EDIT SETTINGS
// ============================================================================
/// Nudge distance as a fraction of the button's own width.
pub const NUDGE_FRACTION: f64 = 0.1;

// ============================================================================
// BACKGROUND SETTINGS
// ============================================================================
/// Background images are downscaled (or upscaled) to fit this square,
/// preserving aspect ratio.
pub const BG_MAX_DIM: u32 = 1024;

/// The scene rect is this multiple of the background image size.
pub const SCENE_MULTIPLIER: f64 = 3.0;

// ============================================================================
// DISPLAY SETTINGS
// ============================================================================
/// Name given to freshly created tabs.
pub const DEFAULT_TAB_NAME: &str = "tab";

/// Shown by the host toolbar when selected buttons disagree on a value.
pub const MULTIPLE_VALUE_DISPLAY: &str = "<multiple>";

/// Tooltips list at most this many bound objects before eliding.
pub const MAX_TOOLTIP_OBJS: usize = 10;

// ============================================================================
// FILE SETTINGS
// ============================================================================
/// Extension for persisted picker layouts.
pub const FILE_EXTENSION: &str = "npk";

/// Placeholder substituted for the active namespace in stored commands.
pub const NS_PLACEHOLDER: &str = "<ns>";

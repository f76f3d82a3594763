// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Pickboard: an embeddable picker-canvas editing engine.
//!
//! An animator places, labels, colors, and binds clickable picker buttons
//! onto a 2D canvas laid over a reference image; clicking a button selects
//! its bound scene objects in the host 3D application (or runs an embedded
//! script). This crate is the editable-canvas core behind that tool: the
//! document model of buttons/tabs/backgrounds, the reversible command
//! history, hit-testing and rubber-band selection, the pan/zoom gesture
//! machine, align/nudge operations, and the `.npk` document codec.
//!
//! The host application supplies windowing, menus, dialogs, and scene-graph
//! access. The core reaches the scene only through the [`Host`] trait and
//! receives input as plain [`MouseEvent`]s; everything else is driven
//! through [`PickerState`].
//!
//! [`MouseEvent`]: editing::MouseEvent

pub mod data;
pub mod editing;
pub mod error;
pub mod host;
pub mod model;
pub mod settings;
pub mod theme;

pub use data::{ButtonConfig, PickerState, SelectionSummary};
pub use error::PickerError;
pub use host::{Host, ScriptLanguage, WatchId};
pub use model::{Background, Button, ButtonId, Payload, Rgb, Tab};

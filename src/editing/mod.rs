// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod align;
pub mod hit_test;
pub mod mouse;
pub mod undo;
pub mod viewport;

pub use align::{AlignEdge, NudgeDirection};
pub use hit_test::SelectMode;
pub use mouse::{CanvasGestures, EditRequest, Modifiers, MouseButton, MouseEvent};
pub use undo::{EditCommand, MoveTarget, UndoStack};
pub use viewport::ViewPort;

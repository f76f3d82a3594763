// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Reversible edit commands and the per-tab undo stack.
//!
//! Every mutating user action is expressed as an [`EditCommand`] and pushed
//! through [`UndoStack::push`], which applies the forward action and records
//! it. Direct mutation of button fields from input handlers bypasses undo
//! and is a defect. Multi-target commands capture one old value per target
//! and apply/invert them atomically as a single history entry.

use crate::model::{Button, ButtonId, Rgb};
use crate::settings::UNDO_LIMIT;
use kurbo::Point;

/// One button's old and new position inside an aggregate move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTarget {
    pub id: ButtonId,
    pub old: Point,
    pub new: Point,
}

/// A reversible edit. Each variant captures enough pre-state to invert its
/// effect exactly; a command either fully captures before mutating or is
/// never pushed.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Move one or more buttons (drag, align, nudge).
    Move { targets: Vec<MoveTarget> },
    /// Relabel the selection to one shared label.
    Rename {
        targets: Vec<(ButtonId, String)>,
        label: String,
    },
    /// Recolor the selection.
    Recolor {
        targets: Vec<(ButtonId, Rgb)>,
        color: Rgb,
    },
    /// Rescale the selection.
    Resize {
        targets: Vec<(ButtonId, (f64, f64))>,
        scale: (f64, f64),
    },
    /// Change the selection's opacity.
    SetOpacity {
        targets: Vec<(ButtonId, f64)>,
        opacity: f64,
    },
    /// Delete buttons; undo restores them verbatim.
    Delete { buttons: Vec<Button> },
    /// Create a button at the position it was constructed with.
    Create { button: Button },
    /// Create a button at an explicit position (context-menu placement).
    CreateAt { button: Button, position: Point },
}

impl EditCommand {
    /// Apply the forward action.
    pub fn apply(&self, buttons: &mut Vec<Button>) {
        match self {
            Self::Move { targets } => {
                for t in targets {
                    if let Some(b) = find_mut(buttons, t.id) {
                        b.position = t.new;
                    }
                }
            }
            Self::Rename { targets, label } => {
                for (id, _) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.label = label.clone();
                    }
                }
            }
            Self::Recolor { targets, color } => {
                for (id, _) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.color = *color;
                    }
                }
            }
            Self::Resize { targets, scale } => {
                for (id, _) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.set_scale(*scale);
                    }
                }
            }
            Self::SetOpacity { targets, opacity } => {
                for (id, _) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.opacity = *opacity;
                    }
                }
            }
            Self::Delete { buttons: removed } => {
                let ids: Vec<ButtonId> = removed.iter().map(|b| b.id).collect();
                buttons.retain(|b| !ids.contains(&b.id));
            }
            Self::Create { button } => {
                buttons.push(button.clone());
            }
            Self::CreateAt { button, position } => {
                let mut button = button.clone();
                button.position = *position;
                buttons.push(button);
            }
        }
    }

    /// Apply the inverse action.
    pub fn revert(&self, buttons: &mut Vec<Button>) {
        match self {
            Self::Move { targets } => {
                for t in targets {
                    if let Some(b) = find_mut(buttons, t.id) {
                        b.position = t.old;
                    }
                }
            }
            Self::Rename { targets, .. } => {
                for (id, old) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.label = old.clone();
                    }
                }
            }
            Self::Recolor { targets, .. } => {
                for (id, old) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.color = *old;
                    }
                }
            }
            Self::Resize { targets, .. } => {
                for (id, old) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.set_scale(*old);
                    }
                }
            }
            Self::SetOpacity { targets, .. } => {
                for (id, old) in targets {
                    if let Some(b) = find_mut(buttons, *id) {
                        b.opacity = *old;
                    }
                }
            }
            Self::Delete { buttons: removed } => {
                buttons.extend(removed.iter().cloned());
            }
            Self::Create { button } | Self::CreateAt { button, .. } => {
                buttons.retain(|b| b.id != button.id);
            }
        }
    }
}

fn find_mut(buttons: &mut [Button], id: ButtonId) -> Option<&mut Button> {
    buttons.iter_mut().find(|b| b.id == id)
}

/// Bounded linear undo history with a cursor.
///
/// Entries before the cursor have been applied; entries at or past it are
/// redoable. Pushing truncates the redo tail and evicts the oldest entry
/// once the cap is reached.
#[derive(Debug)]
pub struct UndoStack {
    entries: Vec<EditCommand>,
    cursor: usize,
    limit: usize,
}

impl UndoStack {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit,
        }
    }

    /// Execute `command` against `buttons` and record it.
    pub fn push(&mut self, command: EditCommand, buttons: &mut Vec<Button>) {
        command.apply(buttons);
        self.entries.truncate(self.cursor);
        self.entries.push(command);
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
    }

    /// Undo the entry at the cursor. A no-op at the start of history.
    pub fn undo(&mut self, buttons: &mut Vec<Button>) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.entries[self.cursor].revert(buttons);
        true
    }

    /// Redo the entry at the cursor. A no-op at the end of history.
    pub fn redo(&mut self, buttons: &mut Vec<Button>) -> bool {
        if self.cursor == self.entries.len() {
            return false;
        }
        self.entries[self.cursor].apply(buttons);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(UNDO_LIMIT)
    }
}

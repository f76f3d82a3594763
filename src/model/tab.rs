// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! A tab: one independent canvas with its own buttons, background,
//! namespace, view transform, and undo history.

use super::{Background, Button, ButtonId};
use crate::editing::{EditCommand, UndoStack, ViewPort};
use std::path::PathBuf;

/// One picker canvas. Exactly one tab is active at a time; the active tab
/// receives input and owns the live selection watch.
#[derive(Debug)]
pub struct Tab {
    pub name: String,
    /// Buttons in stacking order (later buttons draw and hit-test on top).
    /// Order carries no other meaning.
    pub buttons: Vec<Button>,
    pub background: Background,
    /// Namespace prefix applied to object paths at selection time,
    /// including its trailing separator (e.g. `char1:`). Empty for none.
    pub namespace: String,
    pub viewport: ViewPort,
    pub history: UndoStack,
    /// Where this tab was loaded from or last saved to. `None` until the
    /// first save.
    pub source_path: Option<PathBuf>,
}

impl Tab {
    /// A fresh tab with the default background, framed in the view.
    pub fn new(name: impl Into<String>) -> Self {
        let background = Background::default();
        let mut viewport = ViewPort::new();
        viewport.fit_rect(background.image_rect());
        Self {
            name: name.into(),
            buttons: Vec::new(),
            background,
            namespace: String::new(),
            viewport,
            history: UndoStack::default(),
            source_path: None,
        }
    }

    pub fn scene_rect(&self) -> kurbo::Rect {
        self.background.scene_rect()
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.iter_mut().find(|b| b.id == id)
    }

    pub fn selected_ids(&self) -> Vec<ButtonId> {
        self.buttons
            .iter()
            .filter(|b| b.selected)
            .map(|b| b.id)
            .collect()
    }

    pub fn selected_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().filter(|b| b.selected)
    }

    pub fn has_selection(&self) -> bool {
        self.buttons.iter().any(|b| b.selected)
    }

    pub fn clear_selection(&mut self) {
        for b in &mut self.buttons {
            b.selected = false;
        }
    }

    /// Replace the background and reframe the view on the new image.
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
        self.viewport.fit_rect(self.background.image_rect());
    }

    /// Execute an edit through this tab's undo history.
    pub fn push(&mut self, command: EditCommand) {
        self.history.push(command, &mut self.buttons);
    }

    /// Undo the most recent edit. No-op on empty history.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.buttons)
    }

    /// Redo the most recently undone edit. No-op at the end of history.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.buttons)
    }
}

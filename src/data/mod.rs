// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Central picker state (`PickerState`) that drives the host UI.
//!
//! `PickerState` owns the tabs, the active-tab index, the gesture machine,
//! and the selection watch context, and holds the host collaborator it
//! notifies. Every edit goes through the active tab's command history; input
//! handlers only translate gestures into command and selection operations.
//! Sub-modules split the methods by domain: file I/O and host-selection
//! sync.

mod file_io;
mod sync;

pub use sync::SelectionSummary;

use crate::editing::{
    AlignEdge, CanvasGestures, EditCommand, EditRequest, MouseEvent, NudgeDirection, SelectMode,
    align, hit_test,
};
use crate::host::{Host, WatchId};
use crate::model::{Background, Button, ButtonId, Payload, Tab};
use crate::settings::{DEFAULT_TAB_NAME, FRAME_SELECTED_ZOOM, MULTIPLE_VALUE_DISPLAY};
use crate::theme::{self, BUTTON_SIZE};
use crate::{error::PickerError, host::ScriptLanguage, model::Rgb};
use kurbo::{Point, Rect, Size, Vec2};
use std::path::{Path, PathBuf};

/// Appearance applied to freshly created buttons, mirrored from the host's
/// toolbar fields.
#[derive(Debug, Clone)]
pub struct ButtonConfig {
    pub label: String,
    pub size: (f64, f64),
    pub opacity: f64,
    pub color: Rgb,
}

impl ButtonConfig {
    /// The label to stamp on a new button. The multiple-value marker shown
    /// for mixed selections is never a real label.
    fn effective_label(&self) -> &str {
        if self.label == MULTIPLE_VALUE_DISPLAY {
            ""
        } else {
            &self.label
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            size: (1.0, 1.0),
            opacity: 1.0,
            color: theme::DEFAULT_COLOR,
        }
    }
}

/// The namespace-expanded paths of every watched object button, rebuilt
/// whenever the active tab, its namespace, or its button population
/// changes. Owned here rather than living in process-wide state so the
/// host-selection callback has an explicit context.
#[derive(Debug, Default)]
pub(crate) struct WatchContext {
    pub(crate) entries: Vec<(ButtonId, Vec<String>)>,
}

/// Top-level picker state: tabs, active tab, gesture machine, and the host
/// collaborator.
pub struct PickerState<H: Host> {
    pub host: H,
    pub tabs: Vec<Tab>,
    active: usize,
    pub gestures: CanvasGestures,
    pub button_config: ButtonConfig,
    /// Default directory offered by the host's file dialogs.
    pub default_file_dir: PathBuf,
    /// Error message to display, if any.
    pub error_message: Option<String>,
    /// When the active tab was last saved (formatted time string for UI).
    pub last_saved: Option<String>,
    /// Aggregate label/size/opacity of the selection, for host toolbars.
    pub selection_summary: SelectionSummary,
    watch: Option<WatchId>,
    watch_context: WatchContext,
    /// Set while reconciling host-driven selection changes so display
    /// updates never re-issue a host selection command.
    display_only: bool,
}

impl<H: Host> PickerState<H> {
    /// Create the picker with one default tab and a live selection watch.
    pub fn new(host: H) -> Self {
        let mut state = Self {
            host,
            tabs: vec![Tab::new("default")],
            active: 0,
            gestures: CanvasGestures::new(),
            button_config: ButtonConfig::default(),
            default_file_dir: default_file_dir(),
            error_message: None,
            last_saved: None,
            selection_summary: SelectionSummary::default(),
            watch: None,
            watch_context: WatchContext::default(),
            display_only: false,
        };
        state.rebuild_watch();
        state
    }

    // ========================================================================
    // TABS
    // ========================================================================

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Create a tab and make it active.
    pub fn new_tab(&mut self, name: Option<&str>) -> usize {
        self.tabs.push(Tab::new(name.unwrap_or(DEFAULT_TAB_NAME)));
        self.active = self.tabs.len() - 1;
        self.rebuild_watch();
        self.active
    }

    /// Close a tab. No confirmation; the tab's history dies with it.
    pub fn close_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.tabs.remove(index);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len().saturating_sub(1);
        }
        if self.tabs.is_empty() {
            if let Some(id) = self.watch.take() {
                self.host.unwatch(id);
            }
            self.watch_context.entries.clear();
        } else {
            self.selection_changed();
            self.rebuild_watch();
        }
    }

    pub fn rename_tab(&mut self, index: usize, name: &str) {
        if name.is_empty() {
            return;
        }
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.name = name.to_string();
        }
    }

    /// Switch the active tab: the new tab re-announces its selection to
    /// the host and takes over the selection watch.
    pub fn set_active_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.active = index;
        self.selection_changed();
        self.rebuild_watch();
    }

    // ========================================================================
    // NAMESPACE
    // ========================================================================

    /// Set the active tab's namespace prefix (trailing separator included).
    pub fn set_namespace(&mut self, namespace: &str) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        tab.namespace = namespace.to_string();
        self.rebuild_watch();
        self.selection_changed();
    }

    /// The namespace choices for the host's combo box: the empty namespace
    /// followed by every scene namespace with its trailing separator.
    pub fn namespace_choices(&mut self) -> Vec<String> {
        let mut choices = vec![String::new()];
        choices.extend(self.host.list_namespaces().into_iter().map(|ns| format!("{ns}:")));
        self.rebuild_watch();
        choices
    }

    // ========================================================================
    // BUTTON CREATION AND EDITS
    // ========================================================================

    /// Create an object button at the scene center, bound to whatever the
    /// host currently has selected.
    pub fn create_button(&mut self) -> Option<ButtonId> {
        let mut button = self.button_config_button(Payload::Objects(Vec::new()));
        button.bind_objects(&self.host.resolve_selection());
        let tab = self.tabs.get_mut(self.active)?;
        button.position = tab.scene_rect().center();
        let id = button.id;
        tab.push(EditCommand::Create { button });
        tab.clear_selection();
        if let Some(b) = tab.button_mut(id) {
            b.selected = true;
        }
        self.rebuild_watch();
        Some(id)
    }

    /// Create a command button at the scene center with an empty command;
    /// the host's script dialog fills it in via [`set_button_command`].
    ///
    /// [`set_button_command`]: Self::set_button_command
    pub fn create_command_button(&mut self) -> Option<ButtonId> {
        let mut button = self.button_config_button(Payload::empty_command());
        let tab = self.tabs.get_mut(self.active)?;
        button.position = tab.scene_rect().center();
        let id = button.id;
        tab.push(EditCommand::Create { button });
        tab.clear_selection();
        if let Some(b) = tab.button_mut(id) {
            b.selected = true;
        }
        self.rebuild_watch();
        Some(id)
    }

    /// Create an object button centered on a view position (context menu).
    pub fn create_button_at(&mut self, view_pos: Point) -> Option<ButtonId> {
        let mut button = self.button_config_button(Payload::Objects(Vec::new()));
        button.bind_objects(&self.host.resolve_selection());
        let size = self.button_config.size;
        let tab = self.tabs.get_mut(self.active)?;
        let position = centered_position(tab, view_pos, size);
        let id = button.id;
        tab.push(EditCommand::CreateAt { button, position });
        tab.clear_selection();
        if let Some(b) = tab.button_mut(id) {
            b.selected = true;
        }
        self.rebuild_watch();
        Some(id)
    }

    /// Create a command button centered on a view position (context menu).
    pub fn create_command_button_at(&mut self, view_pos: Point) -> Option<ButtonId> {
        let button = self.button_config_button(Payload::empty_command());
        let size = self.button_config.size;
        let tab = self.tabs.get_mut(self.active)?;
        let position = centered_position(tab, view_pos, size);
        let id = button.id;
        tab.push(EditCommand::CreateAt { button, position });
        tab.clear_selection();
        if let Some(b) = tab.button_mut(id) {
            b.selected = true;
        }
        self.rebuild_watch();
        Some(id)
    }

    fn button_config_button(&self, payload: Payload) -> Button {
        let mut button = Button::new(self.button_config.effective_label(), payload);
        button.set_scale(self.button_config.size);
        button.opacity = self.button_config.opacity;
        button.color = self.button_config.color;
        button
    }

    /// Delete the selected buttons as one undoable step.
    pub fn delete_selected(&mut self) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let buttons: Vec<Button> = tab.selected_buttons().cloned().collect();
        if buttons.is_empty() {
            return;
        }
        tab.push(EditCommand::Delete { buttons });
        self.rebuild_watch();
    }

    /// Delete the button under the cursor together with the current
    /// selection.
    pub fn delete_button_at(&mut self, view_pos: Point) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let scene = tab.viewport.to_scene(view_pos);
        let Some(hit) = hit_test::button_at(&tab.buttons, scene) else {
            return;
        };
        let buttons: Vec<Button> = tab
            .buttons
            .iter()
            .filter(|b| b.selected || b.id == hit)
            .cloned()
            .collect();
        tab.push(EditCommand::Delete { buttons });
        self.rebuild_watch();
    }

    /// The button under a view position, if any.
    pub fn button_at_view(&self, view_pos: Point) -> Option<ButtonId> {
        let tab = self.active_tab()?;
        let scene = tab.viewport.to_scene(view_pos);
        hit_test::button_at(&tab.buttons, scene)
    }

    /// Re-bind an object button to the host's current selection.
    /// Returns false for command buttons; their binding goes through
    /// [`set_button_command`].
    ///
    /// [`set_button_command`]: Self::set_button_command
    pub fn bind_button_to_selection(&mut self, id: ButtonId) -> bool {
        let selection = self.host.resolve_selection();
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return false;
        };
        let Some(button) = tab.button_mut(id) else {
            return false;
        };
        if button.is_command() {
            return false;
        }
        button.bind_objects(&selection);
        self.rebuild_watch();
        true
    }

    /// Store dialog-entered script text on a command button, namespace
    /// placeholders applied. A cancelled dialog simply never calls this.
    pub fn set_button_command(&mut self, id: ButtonId, text: &str, language: ScriptLanguage) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let Some(button) = tab.button_mut(id) else {
            return;
        };
        if !button.is_command() {
            return;
        }
        button.bind_command(text, language);
        self.rebuild_watch();
    }

    /// Relabel the selection.
    pub fn rename_selected(&mut self, label: &str) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let targets: Vec<(ButtonId, String)> = tab
            .selected_buttons()
            .map(|b| (b.id, b.label.clone()))
            .collect();
        if targets.is_empty() {
            return;
        }
        tab.push(EditCommand::Rename {
            targets,
            label: label.to_string(),
        });
    }

    /// Recolor the selection.
    pub fn recolor_selected(&mut self, color: Rgb) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let targets: Vec<(ButtonId, Rgb)> =
            tab.selected_buttons().map(|b| (b.id, b.color)).collect();
        if targets.is_empty() {
            return;
        }
        tab.push(EditCommand::Recolor { targets, color });
    }

    /// Rescale the selection.
    pub fn rescale_selected(&mut self, scale: (f64, f64)) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let targets: Vec<(ButtonId, (f64, f64))> =
            tab.selected_buttons().map(|b| (b.id, b.scale())).collect();
        if targets.is_empty() {
            return;
        }
        tab.push(EditCommand::Resize { targets, scale });
    }

    /// Change the selection's opacity.
    pub fn set_selected_opacity(&mut self, opacity: f64) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let targets: Vec<(ButtonId, f64)> =
            tab.selected_buttons().map(|b| (b.id, b.opacity)).collect();
        if targets.is_empty() {
            return;
        }
        tab.push(EditCommand::SetOpacity { targets, opacity });
    }

    /// Align the selection's centers on one axis. One undo step.
    pub fn align(&mut self, edge: AlignEdge) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        if let Some(cmd) = align::align_command(&tab.buttons, edge) {
            tab.push(cmd);
        }
    }

    /// Nudge the selection by a tenth of each button's width. One undo
    /// step.
    pub fn nudge(&mut self, direction: NudgeDirection) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        if let Some(cmd) = align::nudge_command(&tab.buttons, direction) {
            tab.push(cmd);
        }
    }

    pub fn undo(&mut self) {
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.undo();
        }
    }

    pub fn redo(&mut self) {
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.redo();
        }
    }

    // ========================================================================
    // VIEW
    // ========================================================================

    pub fn set_view_size(&mut self, size: Size) {
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.viewport.set_view_size(size);
        }
    }

    /// Frame the selection (or the background image when nothing is
    /// selected) in the view.
    pub fn frame_selected(&mut self) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        let bounds: Vec<Rect> = tab.selected_buttons().map(Button::bounds).collect();
        match bounds.split_first() {
            None => {
                let rect = tab.background.image_rect();
                tab.viewport.fit_rect(rect);
            }
            Some((first, rest)) => {
                let rect = rest.iter().fold(*first, |acc, b| acc.union(*b));
                tab.viewport.fit_rect(rect);
                tab.viewport.zoom_by(FRAME_SELECTED_ZOOM);
            }
        }
    }

    /// Load a background image for the active tab from disk.
    pub fn set_background_from_path(&mut self, path: &Path) -> Result<(), PickerError> {
        match Background::from_path(path) {
            Ok(background) => {
                if let Some(tab) = self.tabs.get_mut(self.active) {
                    tab.set_background(background);
                }
                self.error_message = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to set background: {}", e);
                self.error_message = Some(format!("Failed to set background: {e}"));
                Err(e)
            }
        }
    }

    /// Restore the default background panel.
    pub fn set_default_background(&mut self) {
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.set_background(Background::default());
        }
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    pub fn pointer_pressed(&mut self, event: MouseEvent) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        self.gestures.mouse_down(&event, tab);
    }

    pub fn pointer_moved(&mut self, event: MouseEvent) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        self.gestures.mouse_move(&event, tab);
    }

    pub fn pointer_released(&mut self, event: MouseEvent) {
        let request = {
            let Some(tab) = self.tabs.get_mut(self.active) else {
                return;
            };
            self.gestures.mouse_up(&event, tab)
        };
        if let Some(request) = request {
            self.apply_edit_request(request);
        }
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return;
        };
        self.gestures.wheel(delta_y, tab);
    }

    /// Whether the context menu may open now. A just-finished zoom gesture
    /// swallows one trigger.
    pub fn context_menu_allowed(&mut self) -> bool {
        !self.gestures.take_context_menu_suppressed()
    }

    fn apply_edit_request(&mut self, request: EditRequest) {
        match request {
            EditRequest::Click { view_pos, mods } => {
                let Some(tab) = self.tabs.get_mut(self.active) else {
                    return;
                };
                let scene = tab.viewport.to_scene(view_pos);
                let hit = hit_test::button_at(&tab.buttons, scene);
                hit_test::apply_click(&mut tab.buttons, hit, select_mode(mods));
                self.selection_changed();
            }
            EditRequest::Region { band, mods } => {
                let Some(tab) = self.tabs.get_mut(self.active) else {
                    return;
                };
                let scene_band = tab.viewport.rect_to_scene(band);
                let scene_rect = tab.scene_rect();
                hit_test::apply_region(
                    &mut tab.buttons,
                    scene_band,
                    scene_rect,
                    select_mode(mods),
                );
                self.selection_changed();
            }
            EditRequest::MoveDone { targets } => {
                let Some(tab) = self.tabs.get_mut(self.active) else {
                    return;
                };
                tab.push(EditCommand::Move { targets });
            }
        }
    }
}

fn select_mode(mods: crate::editing::Modifiers) -> SelectMode {
    if mods.ctrl {
        SelectMode::Subtract
    } else if mods.shift {
        SelectMode::Add
    } else {
        SelectMode::Replace
    }
}

/// Position a new button so its cell is centered under the cursor.
fn centered_position(tab: &Tab, view_pos: Point, size: (f64, f64)) -> Point {
    let scene = tab.viewport.to_scene(view_pos);
    scene - Vec2::new(size.0 * BUTTON_SIZE * 0.5, size.1 * BUTTON_SIZE * 0.5)
}

fn default_file_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

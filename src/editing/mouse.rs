// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer input and the canvas gesture state machine.
//!
//! All transitions are driven synchronously by input events on the UI
//! thread. Pan and zoom act on the viewport directly (they are not
//! undoable); everything that edits or selects buttons is returned to the
//! controller as an [`EditRequest`] so the mutation goes through the command
//! and selection layers, never through the gesture handler itself.

use super::hit_test;
use super::undo::MoveTarget;
use crate::model::{ButtonId, Tab};
use kurbo::{Point, Rect, Vec2};

/// Keyboard modifier state accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// A pointer event in view coordinates.
#[derive(Debug, Clone, Copy)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: Option<MouseButton>,
    pub mods: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point, button: Option<MouseButton>, mods: Modifiers) -> Self {
        Self { pos, button, mods }
    }
}

/// A gesture outcome that must be applied through the controller.
#[derive(Debug, Clone)]
pub enum EditRequest {
    /// A click (press and release at the same point) to resolve against
    /// the buttons.
    Click { view_pos: Point, mods: Modifiers },
    /// A completed rubber-band drag, in view coordinates.
    Region { band: Rect, mods: Modifiers },
    /// A completed move gesture; positions have already tracked the
    /// pointer, the command records old and new for undo.
    MoveDone { targets: Vec<MoveTarget> },
}

/// Current gesture. The machine returns to `Idle` on every release.
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    RubberBand {
        origin: Point,
        current: Point,
    },
    MovingButtons {
        start_scene: Point,
        last_scene: Point,
        targets: Vec<ButtonId>,
    },
    Panning {
        last_scene: Point,
    },
    Zooming {
        last_view: Point,
    },
}

/// The canvas interaction state machine for the active tab.
#[derive(Debug)]
pub struct CanvasGestures {
    state: Gesture,
    /// View position of the initial press; exact equality with the release
    /// position distinguishes a click from a drag.
    press_pos: Point,
    press_scene: Point,
    /// Set while a zoom gesture is underway so the context menu that would
    /// fire on right-release is suppressed once.
    suppress_context_menu: bool,
}

impl CanvasGestures {
    pub fn new() -> Self {
        Self {
            state: Gesture::Idle,
            press_pos: Point::ZERO,
            press_scene: Point::ZERO,
            suppress_context_menu: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, Gesture::Idle)
    }

    /// The rubber band rectangle in view coordinates, while one is being
    /// dragged. For the host's overlay drawing.
    pub fn band_rect(&self) -> Option<Rect> {
        match &self.state {
            Gesture::RubberBand { origin, current } => {
                Some(Rect::from_points(*origin, *current))
            }
            _ => None,
        }
    }

    /// Consume the context-menu suppression set by a zoom gesture.
    pub fn take_context_menu_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.suppress_context_menu)
    }

    pub fn mouse_down(&mut self, event: &MouseEvent, tab: &mut Tab) {
        self.press_pos = event.pos;
        self.press_scene = tab.viewport.to_scene(event.pos);

        match event.button {
            Some(MouseButton::Left) if !event.mods.alt => {
                self.state = Gesture::RubberBand {
                    origin: event.pos,
                    current: event.pos,
                };
            }
            Some(MouseButton::Left) => {
                // Move gesture. Pressing an unselected button makes it the
                // selection first, so a bare alt-drag moves just that
                // button.
                if let Some(id) = hit_test::button_at(&tab.buttons, self.press_scene) {
                    let already_selected =
                        tab.buttons.iter().any(|b| b.id == id && b.selected);
                    if !already_selected {
                        for b in &mut tab.buttons {
                            b.selected = b.id == id;
                        }
                    }
                    self.state = Gesture::MovingButtons {
                        start_scene: self.press_scene,
                        last_scene: self.press_scene,
                        targets: tab.selected_ids(),
                    };
                }
            }
            Some(MouseButton::Middle) if event.mods.alt => {
                self.state = Gesture::Panning {
                    last_scene: self.press_scene,
                };
            }
            Some(MouseButton::Right) if event.mods.alt => {
                self.state = Gesture::Zooming {
                    last_view: event.pos,
                };
            }
            _ => {}
        }
    }

    pub fn mouse_move(&mut self, event: &MouseEvent, tab: &mut Tab) {
        match &mut self.state {
            Gesture::Idle => {}
            Gesture::RubberBand { current, .. } => {
                *current = event.pos;
            }
            Gesture::MovingButtons {
                last_scene,
                targets,
                ..
            } => {
                let scene = tab.viewport.to_scene(event.pos);
                let delta = scene - *last_scene;
                for id in targets.iter() {
                    if let Some(b) = tab.buttons.iter_mut().find(|b| b.id == *id) {
                        b.position += delta;
                    }
                }
                *last_scene = scene;
            }
            Gesture::Panning { last_scene } => {
                let scene = tab.viewport.to_scene(event.pos);
                let diff = scene - *last_scene;
                tab.viewport.pan_scene(diff);
                // Re-map under the updated transform so the next delta is
                // relative to where the content now sits.
                *last_scene = tab.viewport.to_scene(event.pos);
            }
            Gesture::Zooming { last_view } => {
                self.suppress_context_menu = true;
                let diff = event.pos - *last_view;
                let zoom_in = diff.x + diff.y >= 0.0;
                let scene_rect = tab.scene_rect();
                tab.viewport.zoom_step(zoom_in, scene_rect);
                *last_view = event.pos;
            }
        }
    }

    pub fn mouse_up(&mut self, event: &MouseEvent, tab: &mut Tab) -> Option<EditRequest> {
        let state = std::mem::replace(&mut self.state, Gesture::Idle);
        match state {
            Gesture::Idle | Gesture::Panning { .. } | Gesture::Zooming { .. } => None,
            Gesture::RubberBand { origin, .. } => {
                // Exact point equality: any sub-pixel travel is a drag.
                if self.press_pos == event.pos {
                    Some(EditRequest::Click {
                        view_pos: event.pos,
                        mods: event.mods,
                    })
                } else {
                    Some(EditRequest::Region {
                        band: Rect::from_points(origin, event.pos),
                        mods: event.mods,
                    })
                }
            }
            Gesture::MovingButtons {
                start_scene,
                targets,
                ..
            } => {
                let offset: Vec2 = tab.viewport.to_scene(event.pos) - start_scene;
                let moves: Vec<MoveTarget> = targets
                    .iter()
                    .filter_map(|id| {
                        tab.buttons.iter().find(|b| b.id == *id).map(|b| MoveTarget {
                            id: *id,
                            old: b.position - offset,
                            new: b.position,
                        })
                    })
                    .collect();
                (!moves.is_empty()).then_some(EditRequest::MoveDone { targets: moves })
            }
        }
    }

    /// Stateless wheel zoom: one step per event, direction from the scroll
    /// sign.
    pub fn wheel(&mut self, delta_y: f64, tab: &mut Tab) {
        let scene_rect = tab.scene_rect();
        tab.viewport.zoom_step(delta_y >= 0.0, scene_rect);
    }
}

impl Default for CanvasGestures {
    fn default() -> Self {
        Self::new()
    }
}

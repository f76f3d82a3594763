// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Spatial queries over buttons and the selection-combination rules.
//!
//! Clicks resolve against button bodies and labels, topmost first. Region
//! (rubber-band) selection is area-based: the modifier rules operate on
//! painted regions built from button bounds, so subtractive selection is a
//! geometric subtraction rather than a set difference.

use crate::model::{Button, ButtonId};
use kurbo::{Point, Rect};

/// How a hit or region combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Replace the selection (no modifier).
    Replace,
    /// Union with the selection (additive modifier).
    Add,
    /// Remove from the selection (subtractive modifier).
    Subtract,
}

/// The topmost button at a scene point. Later buttons in the list stack on
/// top of earlier ones; a hit on a button's label resolves to the button.
pub fn button_at(buttons: &[Button], scene_pos: Point) -> Option<ButtonId> {
    buttons.iter().rev().find(|b| b.hit(scene_pos)).map(|b| b.id)
}

/// Ids of all buttons whose bounds overlap `rect` with positive area.
pub fn buttons_in_rect(buttons: &[Button], rect: Rect) -> Vec<ButtonId> {
    buttons
        .iter()
        .filter(|b| overlap(b.bounds(), rect).is_some())
        .map(|b| b.id)
        .collect()
}

/// Apply a click at `hit` to the selection flags. A click that lands on no
/// button clears the selection regardless of modifiers.
pub fn apply_click(buttons: &mut [Button], hit: Option<ButtonId>, mode: SelectMode) {
    match hit {
        Some(id) => match mode {
            SelectMode::Replace => {
                for b in buttons.iter_mut() {
                    b.selected = b.id == id;
                }
            }
            SelectMode::Add => {
                if let Some(b) = buttons.iter_mut().find(|b| b.id == id) {
                    b.selected = true;
                }
            }
            SelectMode::Subtract => {
                if let Some(b) = buttons.iter_mut().find(|b| b.id == id) {
                    b.selected = false;
                }
            }
        },
        None => {
            for b in buttons.iter_mut() {
                b.selected = false;
            }
        }
    }
}

/// Apply a rubber-band region in scene coordinates to the selection flags.
///
/// An empty hit set clears the selection. Otherwise the new selection is the
/// set of buttons whose bounds intersect the painted result region:
///
/// - `Replace`: the band rectangle itself.
/// - `Add`: the union of band-hit bounds and currently-selected bounds.
/// - `Subtract`: the current selection region (or the whole scene rect when
///   nothing is selected) minus the band-hit bounds.
pub fn apply_region(buttons: &mut [Button], band: Rect, scene_rect: Rect, mode: SelectMode) {
    let hit_ids = buttons_in_rect(buttons, band);
    if hit_ids.is_empty() {
        for b in buttons.iter_mut() {
            b.selected = false;
        }
        return;
    }

    match mode {
        SelectMode::Replace => {
            for b in buttons.iter_mut() {
                b.selected = overlap(b.bounds(), band).is_some();
            }
        }
        SelectMode::Add => {
            let mut area: Vec<Rect> = buttons
                .iter()
                .filter(|b| hit_ids.contains(&b.id) || b.selected)
                .map(|b| b.bounds())
                .collect();
            area.dedup();
            for b in buttons.iter_mut() {
                let bounds = b.bounds();
                b.selected = area.iter().any(|r| overlap(bounds, *r).is_some());
            }
        }
        SelectMode::Subtract => {
            let base: Vec<Rect> = {
                let selected: Vec<Rect> = buttons
                    .iter()
                    .filter(|b| b.selected)
                    .map(|b| b.bounds())
                    .collect();
                if selected.is_empty() {
                    vec![scene_rect]
                } else {
                    selected
                }
            };
            let cuts: Vec<Rect> = buttons
                .iter()
                .filter(|b| hit_ids.contains(&b.id))
                .map(|b| b.bounds())
                .collect();
            for b in buttons.iter_mut() {
                let bounds = b.bounds();
                b.selected = intersects_difference(bounds, &base, &cuts);
            }
        }
    }
}

// ============================================================================
// REGION GEOMETRY
// ============================================================================

/// Positive-area intersection of two rects, if any.
fn overlap(a: Rect, b: Rect) -> Option<Rect> {
    let r = a.intersect(b);
    (r.x1 > r.x0 && r.y1 > r.y0).then_some(r)
}

/// Whether `target` intersects `(∪ base) \ (∪ cuts)` with positive area.
fn intersects_difference(target: Rect, base: &[Rect], cuts: &[Rect]) -> bool {
    for b in base {
        let Some(piece) = overlap(target, *b) else {
            continue;
        };
        let mut remainder = vec![piece];
        for cut in cuts {
            remainder = remainder
                .into_iter()
                .flat_map(|r| subtract_rect(r, *cut))
                .collect();
            if remainder.is_empty() {
                break;
            }
        }
        if !remainder.is_empty() {
            return true;
        }
    }
    false
}

/// Subtract `cut` from `rect`, returning the up-to-four remaining pieces
/// with positive area.
fn subtract_rect(rect: Rect, cut: Rect) -> Vec<Rect> {
    let Some(inner) = overlap(rect, cut) else {
        return vec![rect];
    };
    let candidates = [
        Rect::new(rect.x0, rect.y0, inner.x0, rect.y1), // left strip
        Rect::new(inner.x1, rect.y0, rect.x1, rect.y1), // right strip
        Rect::new(inner.x0, rect.y0, inner.x1, inner.y0), // top strip
        Rect::new(inner.x0, inner.y1, inner.x1, rect.y1), // bottom strip
    ];
    candidates
        .into_iter()
        .filter(|r| r.x1 > r.x0 && r.y1 > r.y0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Button;

    fn make_button(x: f64, y: f64) -> Button {
        let mut b = Button::new_object("");
        b.position = Point::new(x, y);
        b
    }

    fn selected_ids(buttons: &[Button]) -> Vec<ButtonId> {
        buttons.iter().filter(|b| b.selected).map(|b| b.id).collect()
    }

    const SCENE: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

    #[test]
    fn topmost_button_wins() {
        let mut buttons = vec![make_button(0.0, 0.0), make_button(5.0, 5.0)];
        let top = buttons[1].id;
        buttons[0].set_scale((2.0, 2.0));
        assert_eq!(button_at(&buttons, Point::new(10.0, 10.0)), Some(top));
    }

    #[test]
    fn click_replace_selects_only_hit() {
        let mut buttons = vec![make_button(0.0, 0.0), make_button(100.0, 0.0)];
        buttons[1].selected = true;
        let id = buttons[0].id;
        apply_click(&mut buttons, Some(id), SelectMode::Replace);
        assert_eq!(selected_ids(&buttons), vec![id]);
    }

    #[test]
    fn click_add_keeps_existing() {
        let mut buttons = vec![make_button(0.0, 0.0), make_button(100.0, 0.0)];
        buttons[1].selected = true;
        let id = buttons[0].id;
        apply_click(&mut buttons, Some(id), SelectMode::Add);
        assert_eq!(selected_ids(&buttons).len(), 2);
    }

    #[test]
    fn click_subtract_removes_hit() {
        let mut buttons = vec![make_button(0.0, 0.0), make_button(100.0, 0.0)];
        buttons[0].selected = true;
        buttons[1].selected = true;
        let id = buttons[0].id;
        apply_click(&mut buttons, Some(id), SelectMode::Subtract);
        assert_eq!(selected_ids(&buttons), vec![buttons[1].id]);
    }

    #[test]
    fn click_on_empty_space_clears() {
        let mut buttons = vec![make_button(0.0, 0.0)];
        buttons[0].selected = true;
        apply_click(&mut buttons, None, SelectMode::Add);
        assert!(selected_ids(&buttons).is_empty());
    }

    #[test]
    fn region_replace_selects_intersecting() {
        let mut buttons = vec![
            make_button(0.0, 0.0),
            make_button(100.0, 0.0),
            make_button(500.0, 500.0),
        ];
        let band = Rect::new(-5.0, -5.0, 120.0, 20.0);
        apply_region(&mut buttons, band, SCENE, SelectMode::Replace);
        assert_eq!(
            selected_ids(&buttons),
            vec![buttons[0].id, buttons[1].id]
        );
    }

    #[test]
    fn region_with_no_hits_clears() {
        let mut buttons = vec![make_button(0.0, 0.0)];
        buttons[0].selected = true;
        let band = Rect::new(800.0, 800.0, 900.0, 900.0);
        apply_region(&mut buttons, band, SCENE, SelectMode::Add);
        assert!(selected_ids(&buttons).is_empty());
    }

    #[test]
    fn subtractive_region_leaves_the_rest() {
        // Select A, B, C, then subtractively band-select B: exactly
        // {A, C} remain.
        let mut buttons = vec![
            make_button(0.0, 0.0),
            make_button(100.0, 0.0),
            make_button(200.0, 0.0),
        ];
        for b in &mut buttons {
            b.selected = true;
        }
        let band = Rect::new(95.0, -5.0, 120.0, 20.0);
        apply_region(&mut buttons, band, SCENE, SelectMode::Subtract);
        assert_eq!(
            selected_ids(&buttons),
            vec![buttons[0].id, buttons[2].id]
        );
    }

    #[test]
    fn subtract_with_empty_selection_uses_scene_rect() {
        // Nothing selected: the base region is the whole scene, so
        // subtracting the band-hit button selects everything else.
        let mut buttons = vec![make_button(0.0, 0.0), make_button(100.0, 0.0)];
        let band = Rect::new(-5.0, -5.0, 10.0, 10.0);
        apply_region(&mut buttons, band, SCENE, SelectMode::Subtract);
        assert_eq!(selected_ids(&buttons), vec![buttons[1].id]);
    }

    #[test]
    fn additive_region_is_area_based() {
        // C overlaps B's bounds; adding A's region keeps B selected and
        // pulls C in through the painted union.
        let mut buttons = vec![
            make_button(0.0, 0.0),
            make_button(100.0, 0.0),
            make_button(110.0, 5.0),
        ];
        buttons[1].selected = true;
        let band = Rect::new(-5.0, -5.0, 10.0, 10.0);
        apply_region(&mut buttons, band, SCENE, SelectMode::Add);
        assert_eq!(selected_ids(&buttons).len(), 3);
    }

    #[test]
    fn subtract_rect_produces_frame_pieces() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let hole = Rect::new(2.0, 2.0, 8.0, 8.0);
        let pieces = subtract_rect(outer, hole);
        assert_eq!(pieces.len(), 4);
        let area: f64 = pieces.iter().map(|r| r.area()).sum();
        assert!((area - (100.0 - 36.0)).abs() < 1e-9);
    }

    #[test]
    fn subtract_rect_disjoint_is_identity() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let cut = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(subtract_rect(outer, cut), vec![outer]);
    }

    #[test]
    fn fully_covered_rect_vanishes() {
        let outer = Rect::new(2.0, 2.0, 8.0, 8.0);
        let cut = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(subtract_rect(outer, cut).is_empty());
    }
}

// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Align and nudge operations over the current selection.
//!
//! Both are expressed as a single aggregate Move command so an align or a
//! nudge of many buttons undoes as one step.

use super::undo::{EditCommand, MoveTarget};
use crate::model::Button;
use crate::settings::NUDGE_FRACTION;
use kurbo::Point;

/// Which edge the selection aligns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Direction of a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Build the Move command that aligns all selected buttons' bounding-box
/// centers on one axis. Left/top targets the minimum center among the
/// selection, right/bottom the maximum; the orthogonal axis is untouched.
/// Returns `None` when nothing is selected.
pub fn align_command(buttons: &[Button], edge: AlignEdge) -> Option<EditCommand> {
    let selected: Vec<&Button> = buttons.iter().filter(|b| b.selected).collect();
    if selected.is_empty() {
        return None;
    }

    let horizontal = matches!(edge, AlignEdge::Left | AlignEdge::Right);
    let centers = selected.iter().map(|b| {
        let c = b.center();
        if horizontal { c.x } else { c.y }
    });
    let target = match edge {
        AlignEdge::Left | AlignEdge::Top => centers.fold(f64::INFINITY, f64::min),
        AlignEdge::Right | AlignEdge::Bottom => centers.fold(f64::NEG_INFINITY, f64::max),
    };

    let targets = selected
        .iter()
        .map(|b| {
            let bounds = b.bounds();
            let new = if horizontal {
                Point::new(target - bounds.width() / 2.0, b.position.y)
            } else {
                Point::new(b.position.x, target - bounds.height() / 2.0)
            };
            MoveTarget {
                id: b.id,
                old: b.position,
                new,
            }
        })
        .collect();
    Some(EditCommand::Move { targets })
}

/// Build the Move command that shifts every selected button by a tenth of
/// its own width. The width is the nudge unit on both axes.
/// Returns `None` when nothing is selected.
pub fn nudge_command(buttons: &[Button], direction: NudgeDirection) -> Option<EditCommand> {
    let targets: Vec<MoveTarget> = buttons
        .iter()
        .filter(|b| b.selected)
        .map(|b| {
            let step = b.bounds().width() * NUDGE_FRACTION;
            let new = match direction {
                NudgeDirection::Left => Point::new(b.position.x - step, b.position.y),
                NudgeDirection::Right => Point::new(b.position.x + step, b.position.y),
                NudgeDirection::Up => Point::new(b.position.x, b.position.y - step),
                NudgeDirection::Down => Point::new(b.position.x, b.position.y + step),
            };
            MoveTarget {
                id: b.id,
                old: b.position,
                new,
            }
        })
        .collect();
    (!targets.is_empty()).then_some(EditCommand::Move { targets })
}

// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! View transform between scene and view coordinates.
//!
//! The mapping is a uniform scale plus a translation:
//! `view = scene * zoom + offset`. Zooming below the floor does not shrink
//! the content further; the view recenters on the scene instead.

use crate::settings::{MIN_ZOOM, ZOOM_STEP};
use kurbo::{Point, Rect, Size, Vec2};

/// Pan/zoom state for one tab's canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPort {
    /// Size of the host's canvas widget, in view pixels.
    pub view_size: Size,
    /// Scene-to-view scale factor.
    pub zoom: f64,
    /// Scene-to-view translation, in view pixels.
    pub offset: Vec2,
    /// The scene point the view recenters on after zoom changes.
    pub view_center: Point,
}

impl ViewPort {
    pub fn new() -> Self {
        Self {
            view_size: Size::new(800.0, 600.0),
            zoom: 1.0,
            offset: Vec2::ZERO,
            view_center: Point::ZERO,
        }
    }

    /// Map a scene point to view coordinates.
    pub fn to_view(&self, scene: Point) -> Point {
        (scene.to_vec2() * self.zoom + self.offset).to_point()
    }

    /// Map a view point to scene coordinates.
    pub fn to_scene(&self, view: Point) -> Point {
        ((view.to_vec2() - self.offset) / self.zoom).to_point()
    }

    /// Map a view rectangle to scene coordinates.
    pub fn rect_to_scene(&self, view: Rect) -> Rect {
        Rect::from_points(
            self.to_scene(Point::new(view.x0, view.y0)),
            self.to_scene(Point::new(view.x1, view.y1)),
        )
    }

    /// Update the canvas size without disturbing the transform.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Translate the view so content follows the pointer by `delta` scene
    /// units.
    pub fn pan_scene(&mut self, delta: Vec2) {
        self.offset += delta * self.zoom;
        self.view_center -= delta;
    }

    /// Place `scene` at the center of the view.
    pub fn center_on(&mut self, scene: Point) {
        let half = Vec2::new(self.view_size.width / 2.0, self.view_size.height / 2.0);
        self.offset = half - scene.to_vec2() * self.zoom;
    }

    /// Fit `rect` inside the view, preserving aspect ratio, and recenter
    /// on it.
    pub fn fit_rect(&mut self, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.zoom = (self.view_size.width / rect.width())
            .min(self.view_size.height / rect.height());
        self.view_center = rect.center();
        self.center_on(self.view_center);
    }

    /// Apply one zoom step in or out, recentering afterwards.
    ///
    /// Below the floor the scale is left alone and the view recenters on
    /// the scene rect instead, so repeated zoom-outs converge on a framed
    /// overview rather than a vanishing canvas.
    pub fn zoom_step(&mut self, zoom_in: bool, scene_rect: Rect) {
        let factor = if zoom_in {
            1.0 + ZOOM_STEP
        } else {
            1.0 / (1.0 + ZOOM_STEP)
        };
        let zoomed = self.zoom * factor;
        if zoomed > MIN_ZOOM {
            self.zoom = zoomed;
        } else {
            self.view_center = scene_rect.center();
        }
        self.center_on(self.view_center);
    }

    /// Multiply the zoom by `factor` and recenter (used by frame-selected).
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom *= factor;
        self.center_on(self.view_center);
    }
}

impl Default for ViewPort {
    fn default() -> Self {
        Self::new()
    }
}

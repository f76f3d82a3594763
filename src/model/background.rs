// Copyright 2025 the Pickboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Tab background images.
//!
//! A background is a raster reference image the buttons are laid out over.
//! Incoming images are rescaled to fit a fixed square so saved documents
//! stay a reasonable size; the canvas scene rect is derived from the scaled
//! image so there is always room to place buttons around it.

use crate::error::PickerError;
use crate::model::Rgb;
use crate::settings::{BG_MAX_DIM, SCENE_MULTIPLIER};
use crate::theme;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use kurbo::{Rect, Size};
use std::io::Cursor;
use std::path::Path;

/// A decoded background image plus the scene geometry derived from it.
#[derive(Clone)]
pub struct Background {
    image: RgbaImage,
}

impl Background {
    /// A uniform panel, used for tabs that have no reference image yet.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        let Rgb(r, g, b) = color;
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        }
    }

    /// Load a background from an image file on disk.
    pub fn from_path(path: &Path) -> Result<Self, PickerError> {
        if !path.exists() {
            return Err(PickerError::PathNotFound(path.to_path_buf()));
        }
        let img = image::open(path).map_err(|e| PickerError::ImageDecode(e.to_string()))?;
        Ok(Self::from_dynamic(img))
    }

    /// Decode a background from encoded image bytes (a loaded document).
    pub fn from_bytes(data: &[u8]) -> Result<Self, PickerError> {
        let img =
            image::load_from_memory(data).map_err(|e| PickerError::ImageDecode(e.to_string()))?;
        Ok(Self::from_dynamic(img))
    }

    fn from_dynamic(img: DynamicImage) -> Self {
        // Scale to the standard square, preserving aspect ratio. Small
        // images scale up as well, matching the shipped behavior.
        let img = img.resize(BG_MAX_DIM, BG_MAX_DIM, FilterType::Triangle);
        Self {
            image: img.to_rgba8(),
        }
    }

    /// Re-encode the (scaled) image as PNG for embedding in a document.
    pub fn encode_png(&self) -> Result<Vec<u8>, PickerError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| PickerError::ImageDecode(e.to_string()))?;
        Ok(bytes)
    }

    /// Decoded pixels, for the host's renderer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    /// The tab's scene rectangle: three times the image size, so buttons
    /// can be placed well outside the reference image.
    pub fn scene_rect(&self) -> Rect {
        let size = self.size();
        Rect::new(
            0.0,
            0.0,
            size.width * SCENE_MULTIPLIER,
            size.height * SCENE_MULTIPLIER,
        )
    }

    /// Where the image sits: centered in the scene rect.
    pub fn image_rect(&self) -> Rect {
        Rect::from_center_size(self.scene_rect().center(), self.size())
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::solid(BG_MAX_DIM, BG_MAX_DIM, theme::DEFAULT_BG_COLOR)
    }
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Background")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_rect_is_three_times_the_image() {
        let bg = Background::solid(100, 50, Rgb(0, 0, 0));
        assert_eq!(bg.scene_rect(), Rect::new(0.0, 0.0, 300.0, 150.0));
    }

    #[test]
    fn image_is_centered_in_scene() {
        let bg = Background::solid(100, 50, Rgb(0, 0, 0));
        let rect = bg.image_rect();
        assert_eq!(rect.center(), bg.scene_rect().center());
        assert_eq!(rect.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn decoded_images_fit_the_standard_square() {
        let wide = Background::solid(200, 100, Rgb(10, 20, 30));
        let bytes = wide.encode_png().unwrap();
        let decoded = Background::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.width(), BG_MAX_DIM);
        assert_eq!(decoded.height(), BG_MAX_DIM / 2);
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let bg = Background::default();
        let bytes = bg.encode_png().unwrap();
        let decoded = Background::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.width(), bg.width());
        assert_eq!(decoded.height(), bg.height());
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = Background::from_path(Path::new("/nonexistent/bg.png")).unwrap_err();
        assert!(matches!(err, PickerError::PathNotFound(_)));
    }
}

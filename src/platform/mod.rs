//! Platform abstraction layer
//!
//! Converts what the host reports (CSS pixels, device pixel ratio, safe-area
//! insets) into device-pixel [`Bounds`] and tap positions. On the web one
//! density-independent unit is one CSS pixel.

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::{Bounds, Insets};

/// Host display measurements in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
    /// Safe-area insets: left, top, right, bottom
    pub safe_area: [f64; 4],
}

impl DisplayMetrics {
    /// Canvas size in device pixels
    pub fn device_size(&self) -> (u32, u32) {
        (
            to_device_px(self.css_width, self.device_pixel_ratio),
            to_device_px(self.css_height, self.device_pixel_ratio),
        )
    }

    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.device_size();
        let dpr = self.device_pixel_ratio;
        let [left, top, right, bottom] = self.safe_area;
        Bounds::new(width, height, dpr as f32).with_insets(Insets {
            left: to_device_px(left, dpr),
            top: to_device_px(top, dpr),
            right: to_device_px(right, dpr),
            bottom: to_device_px(bottom, dpr),
        })
    }

    /// Map a pointer position relative to the canvas into device pixels
    pub fn to_device_point(&self, css_x: f64, css_y: f64) -> Vec2 {
        Vec2::new(
            (css_x * self.device_pixel_ratio) as f32,
            (css_y * self.device_pixel_ratio) as f32,
        )
    }
}

fn to_device_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}

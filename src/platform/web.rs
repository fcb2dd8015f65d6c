//! Browser display metrics
//!
//! Safe-area insets come from CSS custom properties the page sets to
//! `env(safe-area-inset-*)` on the root element.

use web_sys::{HtmlCanvasElement, Window};

use super::DisplayMetrics;

const INSET_PROPERTIES: [&str; 4] = ["--sal", "--sat", "--sar", "--sab"];

/// Read the canvas size, pixel ratio and safe-area insets
pub fn read_metrics(window: &Window, canvas: &HtmlCanvasElement) -> DisplayMetrics {
    let mut safe_area = [0.0; 4];
    let style = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|root| window.get_computed_style(&root).ok().flatten());
    if let Some(style) = style {
        for (slot, prop) in safe_area.iter_mut().zip(INSET_PROPERTIES) {
            *slot = style
                .get_property_value(prop)
                .ok()
                .and_then(|v| parse_css_px(&v))
                .unwrap_or(0.0);
        }
    } else {
        log::warn!("Computed style unavailable - assuming no safe-area insets");
    }

    DisplayMetrics {
        css_width: canvas.client_width() as f64,
        css_height: canvas.client_height() as f64,
        device_pixel_ratio: window.device_pixel_ratio(),
        safe_area,
    }
}

/// Parse values like `"34px"` or `" 0"`
fn parse_css_px(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

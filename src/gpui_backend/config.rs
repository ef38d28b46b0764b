use crate::render::{Color, LineStyle};

/// Configuration for the GPUI debug plot view.
#[derive(Debug, Clone)]
pub struct DebugPlotViewConfig {
    /// Pixel threshold for starting a pan drag.
    pub drag_threshold_px: f32,
    /// Zoom factor change per scrolled pixel.
    pub zoom_sensitivity: f64,
    /// Approximate number of major ticks per axis.
    pub target_ticks: usize,
    /// Tick label font size in pixels.
    pub label_size: f32,
    /// Series stroke.
    pub line: LineStyle,
    /// Plot background.
    pub background: Color,
    /// Axis, tick and label color.
    pub axis: Color,
    /// Grid line color.
    pub grid: Color,
}

impl Default for DebugPlotViewConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 4.0,
            zoom_sensitivity: 0.002,
            target_ticks: 6,
            label_size: 11.0,
            line: LineStyle::default(),
            background: Color::WHITE,
            axis: Color::new(0.2, 0.2, 0.2, 1.0),
            grid: Color::new(0.78, 0.78, 0.78, 1.0),
        }
    }
}

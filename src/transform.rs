//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Linear transform from data coordinates into screen coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    ///
    /// Degenerate ranges are widened to a minimal span so a single-valued
    /// axis still maps onto the screen.
    pub(crate) fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !viewport.x.is_finite() || !viewport.y.is_finite() {
            return None;
        }
        Some(Self {
            viewport,
            screen,
            x_axis: viewport.x.with_min_span(MIN_SPAN),
            y_axis: viewport.y.with_min_span(MIN_SPAN),
        })
    }

    pub(crate) fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Map a data point into screen space.
    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.x_axis.min) / self.x_axis.span();
        let y_norm = (point.y - self.y_axis.min) / self.y_axis.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map a screen point into data space.
    pub(crate) fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        Point::new(
            self.x_axis.min + x_norm * self.x_axis.span(),
            self.y_axis.min + y_norm * self.y_axis.span(),
        )
    }

    /// Convert a pixel delta into the matching data-space delta.
    pub(crate) fn pixel_delta_to_data(&self, dx: f32, dy: f32) -> (f64, f64) {
        let x = dx as f64 / self.screen.width() as f64 * self.x_axis.span();
        let y = -(dy as f64) / self.screen.height() as f64 * self.y_axis.span();
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    #[test]
    fn linear_roundtrip() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let transform = Transform::new(viewport, square()).expect("valid transform");
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).unwrap();
        let roundtrip = transform.screen_to_data(screen_point);
        assert!((roundtrip.x - point.x).abs() < 1e-4);
        assert!((roundtrip.y - point.y).abs() < 1e-4);
    }

    #[test]
    fn y_axis_points_up() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let transform = Transform::new(viewport, square()).expect("valid transform");
        let low = transform.data_to_screen(Point::new(0.0, 0.0)).unwrap();
        let high = transform.data_to_screen(Point::new(0.0, 10.0)).unwrap();
        assert!(high.y < low.y);
    }

    #[test]
    fn pixel_delta_scales_with_span() {
        let viewport = Viewport::new(Range::new(0.0, 50.0), Range::new(0.0, 10.0));
        let transform = Transform::new(viewport, square()).expect("valid transform");
        let (dx, dy) = transform.pixel_delta_to_data(10.0, 10.0);
        assert!((dx - 5.0).abs() < 1e-9);
        assert!((dy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_screen() {
        let viewport = Viewport::default();
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 10.0));
        assert!(Transform::new(viewport, screen).is_none());
    }
}

//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic; the GPUI backend turns a [`RenderList`]
//! into paint calls.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::new(0.0, 0.0, 1.0, 1.0),
            width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RectStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextStyle {
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineSegment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

impl LineSegment {
    pub(crate) fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// One drawing step produced by a frame.
#[derive(Debug, Clone)]
pub(crate) enum RenderCommand {
    /// Stroked segments, optionally masked to `clip`.
    LineSegments {
        segments: Vec<LineSegment>,
        style: LineStyle,
        clip: Option<ScreenRect>,
    },
    Rect {
        rect: ScreenRect,
        style: RectStyle,
    },
    Text {
        position: ScreenPoint,
        text: String,
        style: TextStyle,
    },
}

/// Ordered render commands for one frame.
#[derive(Debug, Default, Clone)]
pub(crate) struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Push segments masked to `clip`, skipping empty batches.
    pub(crate) fn push_clipped_lines(
        &mut self,
        segments: Vec<LineSegment>,
        style: LineStyle,
        clip: ScreenRect,
    ) {
        if segments.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::LineSegments {
            segments,
            style,
            clip: Some(clip),
        });
    }

    pub(crate) fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Connect consecutive samples into screen segments cut to `clip`.
///
/// A sample that cannot be mapped breaks the line on both sides.
pub(crate) fn build_line_segments(
    points: &[Point],
    transform: &Transform,
    clip: ScreenRect,
) -> Vec<LineSegment> {
    let mapped: Vec<Option<ScreenPoint>> = points
        .iter()
        .map(|point| transform.data_to_screen(*point))
        .collect();
    mapped
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(start), Some(end)) => clip_segment(start, end, clip),
            _ => None,
        })
        .collect()
}

// Liang-Barsky: shrink the parameter interval [t0, t1] edge by edge.
fn clip_segment(start: ScreenPoint, end: ScreenPoint, rect: ScreenRect) -> Option<LineSegment> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let edges = [
        (-dx, start.x - rect.min.x),
        (dx, rect.max.x - start.x),
        (-dy, start.y - rect.min.y),
        (dy, rect.max.y - start.y),
    ];

    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f32| ScreenPoint::new(start.x + t * dx, start.y + t * dy);
    Some(LineSegment::new(at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Range, Viewport};

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0))
    }

    #[test]
    fn inside_segment_is_unchanged() {
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect()).expect("visible");
        assert_eq!(clipped, LineSegment::new(start, end));
    }

    #[test]
    fn segment_is_cut_at_both_edges() {
        let clipped = clip_segment(
            ScreenPoint::new(-5.0, 5.0),
            ScreenPoint::new(15.0, 5.0),
            rect(),
        )
        .expect("visible");
        assert_eq!(clipped.start, ScreenPoint::new(0.0, 5.0));
        assert_eq!(clipped.end, ScreenPoint::new(10.0, 5.0));
    }

    #[test]
    fn outside_segment_is_dropped() {
        let start = ScreenPoint::new(12.0, 1.0);
        let end = ScreenPoint::new(15.0, 9.0);
        assert!(clip_segment(start, end, rect()).is_none());
        let vertical = clip_segment(ScreenPoint::new(-1.0, 0.0), ScreenPoint::new(-1.0, 9.0), rect());
        assert!(vertical.is_none());
    }

    #[test]
    fn line_breaks_around_unmappable_samples() {
        let viewport = Viewport::new(Range::new(0.0, 3.0), Range::new(0.0, 3.0));
        let transform = Transform::new(viewport, rect()).expect("valid transform");
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, f64::NAN),
            Point::new(2.0, 1.0),
            Point::new(3.0, 2.0),
        ];
        let segments = build_line_segments(&points, &transform, rect());
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn empty_batches_are_not_pushed() {
        let mut list = RenderList::new();
        list.push_clipped_lines(Vec::new(), LineStyle::default(), rect());
        assert!(list.commands().is_empty());
        list.push_clipped_lines(
            vec![LineSegment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(1.0, 1.0))],
            LineStyle::default(),
            rect(),
        );
        assert_eq!(list.commands().len(), 1);
    }
}

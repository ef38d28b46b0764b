use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, Hsla, PathBuilder, Pixels, Rgba,
    TextRun, Window, font, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineSegment, LineStyle, RectStyle, RenderCommand, TextStyle};

use super::frame::PlotFrame;

pub(crate) fn paint_frame(frame: &PlotFrame, window: &mut Window, cx: &mut App) {
    for command in frame.render.commands() {
        match command {
            RenderCommand::LineSegments {
                segments,
                style,
                clip: Some(clip),
            } => {
                let mask = ContentMask {
                    bounds: bounds(*clip),
                };
                window.with_content_mask(Some(mask), |window| {
                    stroke_segments(window, segments, *style)
                });
            }
            RenderCommand::LineSegments {
                segments,
                style,
                clip: None,
            } => stroke_segments(window, segments, *style),
            RenderCommand::Rect { rect, style } => fill_rect(window, *rect, *style),
            RenderCommand::Text {
                position,
                text,
                style,
            } => draw_label(window, cx, *position, text, style),
        }
    }
}

fn stroke_segments(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    let Some(first) = segments.first() else {
        return;
    };
    let mut path = PathBuilder::stroke(px(style.width.max(0.5)));
    let mut pen = first.start;
    path.move_to(pixel_point(pen));
    for segment in segments {
        // Consecutive segments share endpoints unless clipping split the line.
        if segment.start != pen {
            path.move_to(pixel_point(segment.start));
        }
        path.line_to(pixel_point(segment.end));
        pen = segment.end;
    }
    match path.build() {
        Ok(path) => window.paint_path(path, rgba(style.color)),
        Err(err) => tracing::warn!(%err, "failed to build plot path"),
    }
}

fn fill_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    window.paint_quad(quad(
        bounds(rect),
        Corners::default(),
        rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        rgba(style.stroke),
        BorderStyle::Solid,
    ));
}

fn draw_label(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let line = window
        .text_system()
        .shape_line(text.to_owned().into(), px(style.size), &[run], None);
    let height = line.ascent + line.descent;
    if let Err(err) = line.paint(pixel_point(position), height, window, cx) {
        tracing::warn!(%err, label = text, "failed to paint axis label");
    }
}

fn rgba(color: Color) -> Rgba {
    Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> Hsla {
    rgba(color).into()
}

fn pixel_point(point: ScreenPoint) -> gpui::Point<Pixels> {
    gpui::point(px(point.x), px(point.y))
}

fn bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(pixel_point(rect.min), pixel_point(rect.max))
}

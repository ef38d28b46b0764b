use crate::axis::{AxisFormatter, Tick, ticks};
use crate::geom::{Point as DataPoint, ScreenPoint, ScreenRect};
use crate::plot::DebugPlot;
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
    build_line_segments,
};
use crate::transform::Transform;
use crate::view::Viewport;

use super::config::DebugPlotViewConfig;
use super::constants::{AXIS_PADDING, TICK_LENGTH};
use super::state::PlotUiState;
use super::text::TextMeasurer;

#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
}

pub(crate) fn build_frame(
    plot: &DebugPlot,
    state: &mut PlotUiState,
    config: &DebugPlotViewConfig,
    area: ScreenRect,
    measurer: &impl TextMeasurer,
) -> PlotFrame {
    let mut render = RenderList::new();
    if area.width() <= 1.0 || area.height() <= 1.0 {
        state.plot_rect = None;
        state.transform = None;
        return PlotFrame { render };
    }

    render.push(RenderCommand::Rect {
        rect: area,
        style: RectStyle {
            fill: config.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    let viewport = plot.viewport();
    let formatter = AxisFormatter::Default;
    let x_ticks = ticks(viewport.x, config.target_ticks, &formatter);
    let y_ticks = ticks(viewport.y, config.target_ticks, &formatter);

    let plot_rect = layout_plot_rect(area, &x_ticks, &y_ticks, config.label_size, measurer);
    state.plot_rect = Some(plot_rect);
    state.transform = Transform::new(viewport, plot_rect);

    let Some(transform) = state.transform.clone() else {
        let message = "Invalid axis range";
        let size = measurer.measure(message, 14.0);
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.min.x + (plot_rect.width() - size.0) * 0.5,
                plot_rect.min.y + (plot_rect.height() - size.1) * 0.5,
            ),
            text: message.to_string(),
            style: TextStyle {
                color: config.axis,
                size: 14.0,
            },
        });
        return PlotFrame { render };
    };

    build_grid(&mut render, config, &x_ticks, &y_ticks, &transform, plot_rect);
    build_series(&mut render, plot, config, &transform, plot_rect);
    build_axes(
        &mut render,
        config,
        &x_ticks,
        &y_ticks,
        &transform,
        plot_rect,
        measurer,
    );

    PlotFrame { render }
}

fn layout_plot_rect(
    area: ScreenRect,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
    label_size: f32,
    measurer: &impl TextMeasurer,
) -> ScreenRect {
    let max_y_label = y_ticks
        .iter()
        .map(|tick| measurer.measure(&tick.label, label_size).0)
        .fold(0.0_f32, f32::max);
    let x_label_height = x_ticks
        .iter()
        .map(|tick| measurer.measure(&tick.label, label_size).1)
        .fold(label_size * 1.2, f32::max);

    let y_axis_width = (max_y_label + TICK_LENGTH + AXIS_PADDING * 2.0).min(area.width() - 1.0);
    let x_axis_height =
        (x_label_height + TICK_LENGTH + AXIS_PADDING * 2.0).min(area.height() - 1.0);

    ScreenRect::new(
        ScreenPoint::new(area.min.x + y_axis_width, area.min.y + AXIS_PADDING),
        ScreenPoint::new(area.max.x - AXIS_PADDING * 2.0, area.max.y - x_axis_height),
    )
}

fn build_grid(
    render: &mut RenderList,
    config: &DebugPlotViewConfig,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
    transform: &Transform,
    plot_rect: ScreenRect,
) {
    let viewport = transform.viewport();
    let mut segments = Vec::new();
    for tick in x_ticks {
        if let Some(x) = tick_x(transform, viewport, tick) {
            segments.push(LineSegment::new(
                ScreenPoint::new(x, plot_rect.min.y),
                ScreenPoint::new(x, plot_rect.max.y),
            ));
        }
    }
    for tick in y_ticks {
        if let Some(y) = tick_y(transform, viewport, tick) {
            segments.push(LineSegment::new(
                ScreenPoint::new(plot_rect.min.x, y),
                ScreenPoint::new(plot_rect.max.x, y),
            ));
        }
    }
    let style = LineStyle {
        color: config.grid,
        width: 1.0,
    };
    render.push_clipped_lines(segments, style, plot_rect);
}

fn build_series(
    render: &mut RenderList,
    plot: &DebugPlot,
    config: &DebugPlotViewConfig,
    transform: &Transform,
    plot_rect: ScreenRect,
) {
    let series = plot.series();
    let range = series.range_by_x(transform.viewport().x);
    // Include one neighbor on each side so lines reach the plot edges.
    let start = range.start.saturating_sub(1);
    let end = (range.end + 1).min(series.len());

    let segments = build_line_segments(&series.points()[start..end], transform, plot_rect);
    render.push_clipped_lines(segments, config.line, plot_rect);
}

fn build_axes(
    render: &mut RenderList,
    config: &DebugPlotViewConfig,
    x_ticks: &[Tick],
    y_ticks: &[Tick],
    transform: &Transform,
    plot_rect: ScreenRect,
    measurer: &impl TextMeasurer,
) {
    let viewport = transform.viewport();
    let label_style = TextStyle {
        color: config.axis,
        size: config.label_size,
    };

    render.push(RenderCommand::Rect {
        rect: plot_rect,
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: config.axis,
            stroke_width: 1.0,
        },
    });

    let mut tick_segments = Vec::new();
    let mut last_label_right = f32::NEG_INFINITY;
    for tick in x_ticks {
        let Some(x) = tick_x(transform, viewport, tick) else {
            continue;
        };
        tick_segments.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.max.y),
            ScreenPoint::new(x, plot_rect.max.y + TICK_LENGTH),
        ));
        let size = measurer.measure(&tick.label, config.label_size);
        let left = x - size.0 * 0.5;
        if left < last_label_right + 2.0 {
            continue;
        }
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(left, plot_rect.max.y + TICK_LENGTH + AXIS_PADDING),
            text: tick.label.clone(),
            style: label_style.clone(),
        });
        last_label_right = left + size.0;
    }

    for tick in y_ticks {
        let Some(y) = tick_y(transform, viewport, tick) else {
            continue;
        };
        tick_segments.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x - TICK_LENGTH, y),
            ScreenPoint::new(plot_rect.min.x, y),
        ));
        let size = measurer.measure(&tick.label, config.label_size);
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.min.x - TICK_LENGTH - AXIS_PADDING - size.0,
                y - size.1 * 0.5,
            ),
            text: tick.label.clone(),
            style: label_style.clone(),
        });
    }

    if !tick_segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: tick_segments,
            style: LineStyle {
                color: config.axis,
                width: 1.0,
            },
            clip: None,
        });
    }
}

fn tick_x(transform: &Transform, viewport: Viewport, tick: &Tick) -> Option<f32> {
    transform
        .data_to_screen(DataPoint::new(tick.value, viewport.y.min))
        .map(|point| point.x)
}

fn tick_y(transform: &Transform, viewport: Viewport, tick: &Tick) -> Option<f32> {
    transform
        .data_to_screen(DataPoint::new(viewport.x.min, tick.value))
        .map(|point| point.y)
}

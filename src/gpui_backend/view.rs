use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use gpui::prelude::*;
use gpui::{
    App, AsyncWindowContext, Entity, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent,
    Pixels, Point, ScrollWheelEvent, Timer, Window, canvas, div, px,
};

use crate::event::{self, PlotEvent};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::plot::{DebugPlot, SampleSender};

use super::config::DebugPlotViewConfig;
use super::constants::{
    AUTOSCROLL_HINT, AUTOSCROLL_LABEL, DEFAULT_PLOT_NAME, EVENT_PUMP_INTERVAL_MS,
    SCROLL_LINE_HEIGHT, TITLE_BAR_HEIGHT,
};
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::{DragState, PlotUiState};
use super::text::GpuiTextMeasurer;

/// A dockable GPUI panel that renders a [`DebugPlot`].
///
/// The title bar shows the plot name and the auto-scroll toggle. Pan (left
/// drag), zoom (scroll wheel) and fit-to-data (double click) are only
/// applied while auto-scroll is off. Right click toggles auto-scroll.
#[derive(Clone)]
pub struct DebugPlotView {
    plot: Arc<RwLock<DebugPlot>>,
    state: Arc<RwLock<PlotUiState>>,
    config: DebugPlotViewConfig,
}

impl DebugPlotView {
    /// Create a view for the given plot with the default configuration.
    pub fn new(plot: DebugPlot) -> Self {
        Self::with_config(plot, DebugPlotViewConfig::default())
    }

    /// Create a view with a custom configuration.
    pub fn with_config(plot: DebugPlot, config: DebugPlotViewConfig) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            state: Arc::new(RwLock::new(PlotUiState::default())),
            config,
        }
    }

    /// Get a handle for driving the underlying plot from other threads.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    /// Route the plot's notifications into the view's UI task.
    ///
    /// Spawns a task on the window's foreground executor that coalesces all
    /// events received during a tick into a single repaint.
    pub fn spawn_event_pump(view: Entity<Self>, window: &mut Window, cx: &mut App) {
        let (sender, receiver) = event::channel();
        view.read(cx)
            .plot_handle()
            .read(|plot| plot.set_event_sink(Arc::new(sender)));

        window
            .spawn(cx, move |cx: &mut AsyncWindowContext| {
                let mut cx = cx.clone();
                async move {
                    loop {
                        Timer::after(Duration::from_millis(EVENT_PUMP_INTERVAL_MS)).await;
                        let (pending, disconnected) = collect_events(&receiver);
                        if pending {
                            let updated = cx.update(|_, cx| {
                                view.update(cx, |_view, view_cx| view_cx.notify());
                            });
                            if updated.is_err() {
                                break;
                            }
                        }
                        if disconnected {
                            break;
                        }
                    }
                }
            })
            .detach();
    }

    fn toggle_autoscroll(&mut self, cx: &mut Context<Self>) {
        let mut plot = self.plot.write().expect("plot lock");
        let enabled = !plot.autoscroll();
        plot.set_autoscroll(enabled);
        drop(plot);
        self.state.write().expect("plot state lock").drag = None;
        cx.notify();
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("plot state lock");
        if !state.in_plot(pos) {
            return;
        }

        match ev.button {
            MouseButton::Right => {
                drop(state);
                self.toggle_autoscroll(cx);
            }
            MouseButton::Left if ev.click_count >= 2 => {
                state.drag = None;
                self.plot.write().expect("plot lock").fit_to_data();
                cx.notify();
            }
            MouseButton::Left => {
                let autoscroll = self.plot.read().expect("plot lock").autoscroll();
                if !autoscroll {
                    state.drag = Some(DragState::new(pos));
                }
            }
            _ => {}
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("plot state lock");
        let Some(mut drag) = state.drag.clone() else {
            return;
        };

        if !drag.active && distance_sq(drag.start, pos) > self.config.drag_threshold_px.powi(2) {
            drag.active = true;
        }
        if drag.active
            && let Some(transform) = state.transform.clone()
        {
            let (dx, dy) = transform.pixel_delta_to_data(pos.x - drag.last.x, pos.y - drag.last.y);
            self.plot.write().expect("plot lock").pan(-dx, -dy);
            drag.last = pos;
            cx.notify();
        }
        state.drag = Some(drag);
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("plot state lock");
        if state.drag.take().is_some() {
            cx.notify();
        }
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let state = self.state.read().expect("plot state lock");
        if !state.in_plot(pos) {
            return;
        }
        let Some(transform) = state.transform.clone() else {
            return;
        };

        let delta = ev.delta.pixel_delta(px(SCROLL_LINE_HEIGHT));
        let zoom_delta = -f32::from(delta.y);
        if zoom_delta.abs() < 0.01 {
            return;
        }
        let factor = (1.0 - zoom_delta as f64 * self.config.zoom_sensitivity).clamp(0.1, 10.0);
        let center = transform.screen_to_data(pos);

        let zoomed = self
            .plot
            .write()
            .expect("plot lock")
            .zoom(center, factor, factor);
        if zoomed {
            cx.notify();
        }
    }

    fn render_title_bar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let (name, autoscroll) = {
            let plot = self.plot.read().expect("plot lock");
            (plot.name(), plot.autoscroll())
        };
        let title = if name.is_empty() {
            DEFAULT_PLOT_NAME.to_string()
        } else {
            name
        };
        let axis = to_hsla(self.config.axis);
        let check = if autoscroll { "[x]" } else { "[ ]" };

        div()
            .flex()
            .flex_row()
            .items_center()
            .gap_2()
            .px_2()
            .h(px(TITLE_BAR_HEIGHT))
            .text_size(px(12.0))
            .text_color(axis)
            .child(div().flex_1().child(title))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap_1()
                    .child(format!("{check} {AUTOSCROLL_LABEL}"))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _ev: &MouseDownEvent, _, cx| {
                            this.toggle_autoscroll(cx);
                        }),
                    ),
            )
            .when(autoscroll, |bar| {
                bar.child(div().text_size(px(10.0)).child(AUTOSCROLL_HINT))
            })
    }
}

impl Render for DebugPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let background = to_hsla(self.config.background);

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(background)
            .child(self.render_title_bar(cx))
            .child(
                div()
                    .flex_1()
                    .child(
                        canvas(
                            move |bounds, window, _| {
                                let plot = plot.read().expect("plot lock");
                                let mut state = state.write().expect("plot state lock");
                                let area = ScreenRect::new(
                                    screen_point(bounds.origin),
                                    screen_point(bounds.bottom_right()),
                                );
                                let measurer = GpuiTextMeasurer::new(window);
                                build_frame(&plot, &mut state, &config, area, &measurer)
                            },
                            move |_, frame, window, cx| {
                                paint_frame(&frame, window, cx);
                            },
                        )
                        .size_full(),
                    )
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, ev, _, cx| {
                            this.on_mouse_down(ev, cx);
                        }),
                    )
                    .on_mouse_down(
                        MouseButton::Right,
                        cx.listener(|this, ev, _, cx| {
                            this.on_mouse_down(ev, cx);
                        }),
                    )
                    .on_mouse_move(cx.listener(|this, ev, _, cx| {
                        this.on_mouse_move(ev, cx);
                    }))
                    .on_mouse_up(
                        MouseButton::Left,
                        cx.listener(|this, ev, _, cx| {
                            this.on_mouse_up(ev, cx);
                        }),
                    )
                    .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                        this.on_scroll(ev, cx);
                    })),
            )
    }
}

/// A handle for driving a [`DebugPlot`] held inside a [`DebugPlotView`].
///
/// The handle clones cheaply and can be moved to host or data threads.
#[derive(Clone)]
pub struct PlotHandle {
    plot: Arc<RwLock<DebugPlot>>,
}

impl PlotHandle {
    /// Read the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&DebugPlot) -> R) -> R {
        let plot = self.plot.read().expect("plot lock");
        f(&plot)
    }

    /// Mutate the plot state, e.g. to drain it once per host update.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut DebugPlot) -> R) -> R {
        let mut plot = self.plot.write().expect("plot lock");
        f(&mut plot)
    }

    /// Producer handle that queues samples without locking the plot.
    pub fn sender(&self) -> SampleSender {
        self.read(DebugPlot::sender)
    }
}

/// Drain all pending events. Returns whether any arrived and whether the
/// sending side is gone.
fn collect_events(receiver: &Receiver<PlotEvent>) -> (bool, bool) {
    let mut pending = false;
    loop {
        match receiver.try_recv() {
            Ok(PlotEvent::NameChanged(name)) => {
                tracing::debug!(%name, "dock title update");
                pending = true;
            }
            Ok(PlotEvent::Redraw) => pending = true,
            Err(TryRecvError::Empty) => return (pending, false),
            Err(TryRecvError::Disconnected) => return (pending, true),
        }
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn distance_sq(a: ScreenPoint, b: ScreenPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

//! Sample buffering and plot feeding.
//!
//! A [`DebugPlot`] receives samples through [`DebugPlot::ingest`] (or a
//! cloned [`SampleSender`] on another thread) and moves them into its
//! bounded series once per update cycle in [`DebugPlot::drain`].

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::{ConfigError, DebugPlotConfig};
use crate::event::{EventSink, PlotEvent};
use crate::geom::Point;
use crate::queue::PendingQueue;
use crate::series::PlotSeries;
use crate::view::{Range, ScrollWindow, View, Viewport};

/// Outcome of one drain cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// Samples moved from the pending queue into the series.
    pub drained: usize,
    /// Samples evicted from the series during the cycle.
    pub evicted: usize,
}

#[derive(Clone, Default)]
struct SharedSink {
    inner: Arc<RwLock<Option<Arc<dyn EventSink>>>>,
}

impl SharedSink {
    fn set(&self, sink: Option<Arc<dyn EventSink>>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    fn post(&self, event: PlotEvent) {
        let sink = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(sink) = sink {
            sink.post(event);
        }
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attached = self
            .inner
            .read()
            .map(|sink| sink.is_some())
            .unwrap_or(false);
        f.debug_struct("SharedSink")
            .field("attached", &attached)
            .finish()
    }
}

/// Producer side of a [`DebugPlot`].
///
/// Clones are cheap and can be moved to data threads. Samples pushed here
/// become visible in the plot after its next drain.
#[derive(Debug, Clone, Default)]
pub struct SampleSender {
    queue: PendingQueue,
    name: Arc<Mutex<String>>,
    events: SharedSink,
}

impl SampleSender {
    /// Queue a sample and update the series name.
    ///
    /// A [`PlotEvent::NameChanged`] is posted only when `name` differs from
    /// the stored one.
    pub fn ingest(&self, sample: Point, name: &str) {
        self.queue.push(sample);

        let changed = {
            let mut current = self.name.lock().unwrap_or_else(PoisonError::into_inner);
            if *current != name {
                *current = name.to_owned();
                true
            } else {
                false
            }
        };
        if changed {
            tracing::debug!(name, "plot name changed");
            self.events.post(PlotEvent::NameChanged(name.to_owned()));
        }
    }

    /// Current series name.
    pub fn name(&self) -> String {
        self.name
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of samples waiting for the next drain.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

/// Scrolling line plot fed from a pending sample queue.
#[derive(Debug)]
pub struct DebugPlot {
    sender: SampleSender,
    series: PlotSeries,
    view: View,
    viewport: Viewport,
    window: ScrollWindow,
}

impl DebugPlot {
    /// Create a plot with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(&DebugPlotConfig::default())
    }

    /// Create a plot from a configuration.
    pub fn with_config(config: DebugPlotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    fn from_valid_config(config: &DebugPlotConfig) -> Self {
        Self {
            sender: SampleSender::default(),
            series: PlotSeries::new(config.max_samples, config.remove_samples),
            view: View::from_autoscroll(config.autoscroll),
            viewport: Viewport::default(),
            window: config.scroll_window(),
        }
    }

    /// Attach the sink that receives name and redraw notifications.
    ///
    /// Replaces any previously attached sink.
    pub fn set_event_sink(&self, sink: Arc<dyn EventSink>) {
        self.sender.events.set(Some(sink));
    }

    /// Producer handle sharing this plot's queue and name.
    pub fn sender(&self) -> SampleSender {
        self.sender.clone()
    }

    /// Queue a sample. See [`SampleSender::ingest`].
    pub fn ingest(&self, sample: Point, name: &str) {
        self.sender.ingest(sample, name);
    }

    /// Move all pending samples into the series.
    ///
    /// While auto-scrolling, the view then follows the last drained sample.
    /// A redraw request is posted at the end of every cycle.
    pub fn drain(&mut self) -> DrainReport {
        let pending = self.sender.queue.take_all();
        let mut report = DrainReport::default();
        let mut last = None;
        for point in pending {
            report.evicted += self.series.push(point);
            report.drained += 1;
            last = Some(point);
        }

        if self.view.is_autoscroll()
            && let Some(last) = last
        {
            self.follow(last);
        }

        if report.drained > 0 {
            tracing::trace!(
                drained = report.drained,
                evicted = report.evicted,
                retained = self.series.len(),
                "drained pending samples"
            );
        }
        self.sender.events.post(PlotEvent::Redraw);
        report
    }

    // Invalid ranges leave the matching axis where it was.
    fn follow(&mut self, last: Point) {
        let x_range = self.window.x_range(last.x);
        if !x_range.is_valid() {
            return;
        }
        self.viewport.x = x_range;
        if let Some(y_range) = self.series.value_range(x_range)
            && y_range.is_valid()
        {
            self.viewport.y = y_range;
        }
    }

    /// Enable or disable auto-scroll.
    pub fn set_autoscroll(&mut self, enabled: bool) {
        if self.view.is_autoscroll() != enabled {
            tracing::info!(enabled, "auto scroll toggled");
        }
        self.view = View::from_autoscroll(enabled);
    }

    /// Check whether auto-scroll is enabled.
    pub fn autoscroll(&self) -> bool {
        self.view.is_autoscroll()
    }

    /// Access the active view mode.
    pub fn view(&self) -> View {
        self.view
    }

    /// Access the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the retained series.
    pub fn series(&self) -> &PlotSeries {
        &self.series
    }

    /// Current series name.
    pub fn name(&self) -> String {
        self.sender.name()
    }

    /// Number of samples waiting for the next drain.
    pub fn pending_len(&self) -> usize {
        self.sender.pending_len()
    }

    /// Replace the viewport. Ignored while auto-scrolling.
    pub fn set_manual_view(&mut self, viewport: Viewport) -> bool {
        if self.view.is_autoscroll() {
            return false;
        }
        self.viewport = viewport;
        true
    }

    /// Pan by a data-space offset. Ignored while auto-scrolling.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        let next = self.viewport.panned(dx, dy);
        self.set_manual_view(next)
    }

    /// Zoom around a data-space center. Ignored while auto-scrolling.
    pub fn zoom(&mut self, center: Point, factor_x: f64, factor_y: f64) -> bool {
        let next = self.viewport.zoomed(center.x, center.y, factor_x, factor_y);
        if !next.x.is_finite() || !next.y.is_finite() {
            return false;
        }
        self.set_manual_view(next)
    }

    /// Fit the view to all retained samples. Ignored while auto-scrolling.
    pub fn fit_to_data(&mut self) -> bool {
        let mut finite = self
            .series
            .points()
            .iter()
            .filter(|point| point.x.is_finite() && point.y.is_finite());
        let Some(first) = finite.next() else {
            return false;
        };
        let mut x_range = Range::new(first.x, first.x);
        let mut y_range = Range::new(first.y, first.y);
        for point in finite {
            x_range.expand_to_include(point.x);
            y_range.expand_to_include(point.y);
        }
        let mut next = self.viewport;
        if x_range.is_valid() {
            next.x = x_range;
        }
        if y_range.is_valid() {
            next.y = y_range;
        }
        self.set_manual_view(next)
    }
}

impl Default for DebugPlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::testing::RecordingSink;

    fn ingest_ramp(plot: &DebugPlot, range: std::ops::Range<usize>) {
        for i in range {
            plot.ingest(Point::new(i as f64, i as f64), "ramp");
        }
    }

    #[test]
    fn ingest_does_not_touch_series() {
        let plot = DebugPlot::new();
        ingest_ramp(&plot, 0..10);
        assert_eq!(plot.pending_len(), 10);
        assert!(plot.series().is_empty());
    }

    #[test]
    fn drain_keeps_samples_in_order_below_capacity() {
        let mut plot = DebugPlot::new();
        ingest_ramp(&plot, 0..2000);
        let report = plot.drain();
        assert_eq!(report.drained, 2000);
        assert_eq!(report.evicted, 0);
        assert_eq!(plot.series().len(), 2000);
        assert_eq!(plot.pending_len(), 0);
        for (index, point) in plot.series().points().iter().enumerate() {
            assert_eq!(point.x, index as f64);
        }
    }

    #[test]
    fn drain_over_capacity_evicts_one_batch() {
        let mut plot = DebugPlot::new();
        ingest_ramp(&plot, 0..2001);
        let report = plot.drain();
        assert_eq!(report.evicted, 200);
        assert_eq!(plot.series().len(), 1801);
        let points = plot.series().points();
        assert_eq!(points[0].x, 200.0);
        assert_eq!(points[1800].x, 2000.0);
    }

    #[test]
    fn series_never_exceeds_capacity_after_drain() {
        let mut plot = DebugPlot::new();
        for batch in [1, 999, 1500, 7, 4321, 2000] {
            let start = plot.series().len();
            ingest_ramp(&plot, start..start + batch);
            plot.drain();
            assert!(plot.series().len() <= 2000);
        }
    }

    #[test]
    fn name_change_notifies_once_per_distinct_name() {
        let plot = DebugPlot::new();
        let sink = Arc::new(RecordingSink::default());
        plot.set_event_sink(sink.clone());

        for i in 0..5 {
            plot.ingest(Point::new(i as f64, 0.0), "speed");
        }
        for i in 5..10 {
            plot.ingest(Point::new(i as f64, 0.0), "torque");
        }
        plot.ingest(Point::new(10.0, 0.0), "torque");

        assert_eq!(
            sink.events(),
            vec![
                PlotEvent::NameChanged("speed".into()),
                PlotEvent::NameChanged("torque".into()),
            ]
        );
        assert_eq!(plot.name(), "torque");
    }

    #[test]
    fn autoscroll_follows_last_sample() {
        let mut plot = DebugPlot::new();
        plot.ingest(Point::new(2.0, -1.0), "a");
        plot.ingest(Point::new(5.0, 3.0), "a");
        plot.ingest(Point::new(10.0, 1.0), "a");
        plot.drain();
        let viewport = plot.viewport();
        assert_eq!(viewport.x, Range::new(4.0, 11.0));
        assert_eq!(viewport.y, Range::new(1.0, 3.0));
    }

    #[test]
    fn autoscroll_keeps_y_when_window_is_empty() {
        let mut plot = DebugPlot::new();
        plot.ingest(Point::new(10.0, 1.0), "a");
        plot.ingest(Point::new(11.0, 4.0), "a");
        plot.drain();
        let before = plot.viewport().y;

        plot.ingest(Point::new(20.0, f64::NAN), "a");
        plot.drain();
        assert_eq!(plot.viewport().x, Range::new(14.0, 21.0));
        assert_eq!(plot.viewport().y, before);
    }

    #[test]
    fn flat_signal_keeps_previous_y_range() {
        let mut plot = DebugPlot::new();
        plot.ingest(Point::new(1.0, 3.0), "flat");
        plot.drain();
        assert_eq!(plot.viewport().y, Range::new(0.0, 5.0));

        for i in 2..20 {
            plot.ingest(Point::new(i as f64, 3.0), "flat");
        }
        plot.drain();
        let viewport = plot.viewport();
        assert_eq!(viewport.x, Range::new(13.0, 20.0));
        assert!(viewport.y.span() > 0.0);
        assert!(viewport.is_valid());
    }

    #[test]
    fn non_finite_x_keeps_previous_view() {
        let mut plot = DebugPlot::new();
        plot.ingest(Point::new(10.0, 1.0), "a");
        plot.ingest(Point::new(11.0, 2.0), "a");
        plot.drain();
        let before = plot.viewport();

        plot.ingest(Point::new(f64::NAN, 1.0), "a");
        plot.drain();
        assert_eq!(plot.viewport(), before);
        assert_eq!(plot.series().len(), 3);

        plot.ingest(Point::new(f64::INFINITY, 1.0), "a");
        plot.drain();
        assert_eq!(plot.viewport(), before);

        plot.ingest(Point::new(12.0, 4.0), "a");
        plot.drain();
        assert_eq!(plot.viewport().x, Range::new(6.0, 13.0));
        assert_eq!(plot.viewport().y, Range::new(1.0, 4.0));
    }

    #[test]
    fn manual_view_is_not_overwritten_by_drain() {
        let mut plot = DebugPlot::new();
        plot.set_autoscroll(false);
        let manual = Viewport::new(Range::new(-1.0, 1.0), Range::new(-2.0, 2.0));
        assert!(plot.set_manual_view(manual));

        ingest_ramp(&plot, 0..50);
        plot.drain();
        assert_eq!(plot.viewport(), manual);
    }

    #[test]
    fn pan_and_zoom_rejected_while_autoscrolling() {
        let mut plot = DebugPlot::new();
        let before = plot.viewport();
        assert!(!plot.pan(1.0, 1.0));
        assert!(!plot.zoom(Point::new(0.0, 0.0), 0.5, 0.5));
        assert!(!plot.set_manual_view(Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0))));
        assert_eq!(plot.viewport(), before);

        plot.set_autoscroll(false);
        assert!(plot.pan(1.0, 0.0));
        assert_eq!(plot.viewport().x, Range::new(1.0, 6.0));
    }

    #[test]
    fn drain_always_requests_one_redraw() {
        let mut plot = DebugPlot::new();
        let sink = Arc::new(RecordingSink::default());
        plot.set_event_sink(sink.clone());

        plot.drain();
        assert_eq!(sink.count(&PlotEvent::Redraw), 1);
        ingest_ramp(&plot, 0..3);
        plot.drain();
        assert_eq!(sink.count(&PlotEvent::Redraw), 2);
    }

    #[test]
    fn sender_feeds_plot_from_another_thread() {
        let mut plot = DebugPlot::new();
        let sender = plot.sender();
        let producer = std::thread::spawn(move || {
            for i in 0..100 {
                sender.ingest(Point::new(i as f64, 0.0), "remote");
            }
        });
        producer.join().expect("producer thread");

        assert_eq!(plot.drain().drained, 100);
        assert_eq!(plot.name(), "remote");
    }

    #[test]
    fn with_config_validates() {
        let config = DebugPlotConfig {
            max_samples: 10,
            remove_samples: 20,
            ..Default::default()
        };
        assert!(DebugPlot::with_config(config).is_err());

        let config = DebugPlotConfig {
            max_samples: 10,
            remove_samples: 4,
            autoscroll: false,
            ..Default::default()
        };
        let mut plot = DebugPlot::with_config(config).expect("valid config");
        assert!(!plot.autoscroll());
        ingest_ramp(&plot, 0..11);
        plot.drain();
        assert_eq!(plot.series().len(), 7);
    }

    #[test]
    fn fit_to_data_covers_all_samples() {
        let mut plot = DebugPlot::new();
        plot.set_autoscroll(false);
        plot.ingest(Point::new(-3.0, 2.0), "a");
        plot.ingest(Point::new(8.0, -5.0), "a");
        plot.drain();
        assert!(plot.fit_to_data());
        assert_eq!(plot.viewport().x, Range::new(-3.0, 8.0));
        assert_eq!(plot.viewport().y, Range::new(-5.0, 2.0));
    }

    #[test]
    fn fit_to_data_keeps_axis_with_flat_values() {
        let mut plot = DebugPlot::new();
        plot.set_autoscroll(false);
        plot.ingest(Point::new(0.0, 2.0), "a");
        plot.ingest(Point::new(f64::NAN, 9.0), "a");
        plot.ingest(Point::new(4.0, 2.0), "a");
        plot.drain();
        assert!(plot.fit_to_data());
        assert_eq!(plot.viewport().x, Range::new(0.0, 4.0));
        assert_eq!(plot.viewport().y, Range::new(0.0, 5.0));
    }
}

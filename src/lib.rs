//! gpui_debugplot is a scrolling debug-drawing line plot built for GPUI.
//!
//! Named samples are queued from any thread, drained into a bounded series
//! once per host update, and shown in a dock panel that can follow the most
//! recent data.

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod event;
pub mod geom;
pub mod gpui_backend;
pub mod plot;
pub mod queue;
pub mod render;
pub mod series;
mod transform;
pub mod view;
pub mod visualization;

pub use axis::AxisFormatter;
pub use config::{ConfigError, DEFAULT_MAX_SAMPLES, DEFAULT_REMOVE_SAMPLES, DebugPlotConfig};
pub use event::{EventSink, PlotEvent};
pub use geom::Point;
pub use gpui_backend::{DebugPlotView, DebugPlotViewConfig, PlotHandle};
pub use plot::{DebugPlot, DrainReport, SampleSender};
pub use queue::PendingQueue;
pub use render::{Color, LineStyle};
pub use series::PlotSeries;
pub use view::{Range, ScrollWindow, View, Viewport};
pub use visualization::{PlotDrawing, Visualization};

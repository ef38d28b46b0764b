//! GPUI integration for gpui_debugplot.
//!
//! This module provides a dockable GPUI view that renders a
//! [`DebugPlot`](crate::plot::DebugPlot), exposes the auto-scroll toggle and
//! repaints when the plot posts a redraw request.

#![allow(clippy::collapsible_if)]

mod config;
mod constants;
mod frame;
mod paint;
mod state;
mod text;
mod view;

pub use config::DebugPlotViewConfig;
pub use view::{DebugPlotView, PlotHandle};

//! Contract between a visualization and the host that drives it.

use crate::geom::Point;
use crate::plot::{DebugPlot, DrainReport};

/// One named sample delivered by a debug-drawing channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDrawing {
    /// Name of the plot the sample belongs to.
    pub name: String,
    /// The sample itself.
    pub data: Point,
}

impl PlotDrawing {
    /// Create a named sample.
    pub fn new(name: impl Into<String>, data: Point) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Entry points a host framework calls on a visualization.
///
/// `update_data` may be invoked from a data thread, `update_main_node` once
/// per render cycle.
pub trait Visualization {
    /// Input record accepted by [`Visualization::update_data`].
    type Input;
    /// Result of one update cycle.
    type Update;

    /// Display name shown by the host.
    fn name(&self) -> String;

    /// Hand new input to the visualization.
    fn update_data(&self, input: Self::Input);

    /// Per-cycle update.
    fn update_main_node(&mut self) -> Self::Update;
}

impl Visualization for DebugPlot {
    type Input = PlotDrawing;
    type Update = DrainReport;

    fn name(&self) -> String {
        DebugPlot::name(self)
    }

    fn update_data(&self, input: PlotDrawing) {
        self.ingest(input.data, &input.name);
    }

    fn update_main_node(&mut self) -> DrainReport {
        self.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<V: Visualization<Input = PlotDrawing>>(vis: &mut V, count: usize) -> V::Update {
        for i in 0..count {
            vis.update_data(PlotDrawing::new("host", Point::new(i as f64, 1.0)));
        }
        vis.update_main_node()
    }

    #[test]
    fn host_cycle_drains_plot() {
        let mut plot = DebugPlot::new();
        let report = drive(&mut plot, 12);
        assert_eq!(report.drained, 12);
        assert_eq!(Visualization::name(&plot), "host");
        assert_eq!(plot.series().len(), 12);
    }
}

use crate::geom::{ScreenPoint, ScreenRect};
use crate::transform::Transform;

#[derive(Debug, Clone)]
pub(crate) struct DragState {
    pub(crate) start: ScreenPoint,
    pub(crate) last: ScreenPoint,
    pub(crate) active: bool,
}

impl DragState {
    pub(crate) fn new(start: ScreenPoint) -> Self {
        Self {
            start,
            last: start,
            active: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PlotUiState {
    pub(crate) plot_rect: Option<ScreenRect>,
    pub(crate) transform: Option<Transform>,
    pub(crate) drag: Option<DragState>,
}

impl PlotUiState {
    pub(crate) fn in_plot(&self, point: ScreenPoint) -> bool {
        self.plot_rect.is_some_and(|rect| rect.contains(point))
    }
}

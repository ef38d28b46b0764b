pub(crate) const AXIS_PADDING: f32 = 6.0;
pub(crate) const TICK_LENGTH: f32 = 5.0;
pub(crate) const TITLE_BAR_HEIGHT: f32 = 26.0;
pub(crate) const SCROLL_LINE_HEIGHT: f32 = 16.0;
pub(crate) const DEFAULT_PLOT_NAME: &str = "default name";
pub(crate) const AUTOSCROLL_LABEL: &str = "auto scroll";
pub(crate) const AUTOSCROLL_HINT: &str = "Use mouse to zoom and drag if auto scroll is disabled";
pub(crate) const EVENT_PUMP_INTERVAL_MS: u64 = 16;

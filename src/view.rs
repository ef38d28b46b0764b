//! View models and data ranges.

/// Range shown on both axes before any data arrives.
pub const DEFAULT_RANGE: Range = Range { min: 0.0, max: 5.0 };

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Center of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Shift both bounds by the same offset.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Scale the range around an anchor value.
    pub fn scaled_around(&self, anchor: f64, factor: f64) -> Self {
        Self::new(
            anchor + (self.min - anchor) * factor,
            anchor + (self.max - anchor) * factor,
        )
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let span = self.span();
        if span >= min_span {
            return *self;
        }
        let center = self.center();
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// The active view mode for a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Follow the most recent sample; manual pan/zoom is suppressed.
    #[default]
    AutoScroll,
    /// User-controlled view that drains never overwrite.
    Manual,
}

impl View {
    /// Build the view mode for an auto-scroll flag.
    pub fn from_autoscroll(enabled: bool) -> Self {
        if enabled { Self::AutoScroll } else { Self::Manual }
    }

    /// Check whether the view follows incoming data.
    pub fn is_autoscroll(self) -> bool {
        self == Self::AutoScroll
    }
}

/// Visible data ranges on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Check whether both axes are valid.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Move the viewport by a data-space offset.
    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x.shifted(dx), self.y.shifted(dy))
    }

    /// Zoom the viewport around a data-space center.
    ///
    /// Factors below 1.0 zoom in, above 1.0 zoom out.
    pub fn zoomed(&self, center_x: f64, center_y: f64, factor_x: f64, factor_y: f64) -> Self {
        Self::new(
            self.x.scaled_around(center_x, factor_x),
            self.y.scaled_around(center_y, factor_y),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE, DEFAULT_RANGE)
    }
}

/// X window kept in view while auto-scrolling.
///
/// The window spans `before` units behind and `after` units ahead of the
/// latest sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollWindow {
    /// Distance shown behind the latest sample.
    pub before: f64,
    /// Distance shown ahead of the latest sample.
    pub after: f64,
}

impl ScrollWindow {
    /// X range that follows a sample at `last_x`.
    pub fn x_range(&self, last_x: f64) -> Range {
        Range::new(last_x - self.before, last_x + self.after)
    }
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self {
            before: 6.0,
            after: 1.0,
        }
    }
}

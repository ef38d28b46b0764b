//! Capacity-bounded plot series.
//!
//! Samples are kept in arrival order. Once the series grows past its
//! capacity, the oldest batch is dropped in one operation so eviction cost is
//! paid once per batch rather than once per sample.

use crate::geom::Point;
use crate::view::Range;

/// Retained samples of a plot, bounded by a maximum count.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    points: Vec<Point>,
    max_samples: usize,
    remove_samples: usize,
    monotonic: bool,
}

impl PlotSeries {
    /// Create an empty series.
    ///
    /// `remove_samples` is clamped into `1..=max_samples`.
    pub fn new(max_samples: usize, remove_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            points: Vec::with_capacity(max_samples + 1),
            max_samples,
            remove_samples: remove_samples.clamp(1, max_samples),
            monotonic: true,
        }
    }

    /// Append a sample, evicting the oldest batch when over capacity.
    ///
    /// Returns the number of evicted samples.
    pub fn push(&mut self, point: Point) -> usize {
        // NaN has no place in a sorted sequence.
        if let Some(last) = self.points.last()
            && (point.x.is_nan() || last.x.is_nan() || point.x < last.x)
        {
            self.monotonic = false;
        }
        self.points.push(point);

        if self.points.len() > self.max_samples {
            self.evict_oldest()
        } else {
            0
        }
    }

    fn evict_oldest(&mut self) -> usize {
        let count = self.remove_samples.min(self.points.len());
        self.points.drain(..count);
        if !self.monotonic {
            self.monotonic = self.points.windows(2).all(|pair| pair[0].x <= pair[1].x);
        }
        tracing::debug!(
            evicted = count,
            retained = self.points.len(),
            "evicted oldest samples"
        );
        count
    }

    /// Access all retained samples, oldest first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Most recently appended sample.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of retained samples.
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Number of samples evicted per batch.
    pub fn remove_samples(&self) -> usize {
        self.remove_samples
    }

    /// Check whether X values are non-decreasing.
    pub fn is_monotonic(&self) -> bool {
        self.monotonic
    }

    /// Index range of samples whose X lies inside `range`.
    ///
    /// Non-monotonic data cannot be sliced and yields the full range.
    pub fn range_by_x(&self, range: Range) -> std::ops::Range<usize> {
        if self.points.is_empty() {
            return 0..0;
        }
        if !self.monotonic {
            return 0..self.points.len();
        }
        let start = self.points.partition_point(|point| point.x < range.min);
        let end = self.points.partition_point(|point| point.x <= range.max);
        start..end.max(start)
    }

    /// Y value range of samples whose X lies inside `x_range`.
    ///
    /// Returns `None` when no finite sample falls inside the window.
    pub fn value_range(&self, x_range: Range) -> Option<Range> {
        let mut y_range: Option<Range> = None;
        for point in &self.points[self.range_by_x(x_range)] {
            if !x_range.contains(point.x) || !point.y.is_finite() {
                continue;
            }
            y_range = Some(match y_range {
                None => Range::new(point.y, point.y),
                Some(mut existing) => {
                    existing.expand_to_include(point.y);
                    existing
                }
            });
        }
        y_range
    }
}

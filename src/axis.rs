//! Axis tick placement and label formatting.

use std::sync::Arc;

use crate::view::Range;

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Numeric formatter with precision derived from the tick step.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a tick value. `step` is the distance between major ticks.
    pub fn format(&self, value: f64, step: f64) -> String {
        match self {
            Self::Default => {
                let decimals = if step >= 1.0 || step <= 0.0 {
                    0
                } else {
                    (-step.log10()).ceil().clamp(0.0, 12.0) as usize
                };
                // Avoid "-0" labels.
                let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
                format!("{value:.decimals$}")
            }
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// A labeled tick on an axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tick {
    pub(crate) value: f64,
    pub(crate) label: String,
}

/// Pick a 1/2/5 step that yields roughly `target` ticks across `range`.
pub(crate) fn nice_step(range: Range, target: usize) -> Option<f64> {
    if !range.is_valid() || target == 0 {
        return None;
    }
    let raw = range.span() / target as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = factor * magnitude;
    (step.is_finite() && step > 0.0).then_some(step)
}

/// Generate labeled ticks for a range.
pub(crate) fn ticks(range: Range, target: usize, formatter: &AxisFormatter) -> Vec<Tick> {
    let Some(step) = nice_step(range, target) else {
        return Vec::new();
    };
    let first = (range.min / step).ceil() as i64;
    let last = (range.max / step).floor() as i64;
    if last < first || last - first > 1000 {
        return Vec::new();
    }
    (first..=last)
        .map(|index| {
            let value = index as f64 * step;
            Tick {
                value,
                label: formatter.format(value, step),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_prefers_round_values() {
        assert_eq!(nice_step(Range::new(0.0, 10.0), 5), Some(2.0));
        assert_eq!(nice_step(Range::new(4.0, 11.0), 5), Some(2.0));
        let step = nice_step(Range::new(0.0, 0.3), 3).expect("step");
        assert!((step - 0.1).abs() < 1e-12);
        assert_eq!(nice_step(Range::new(1.0, 1.0), 5), None);
    }

    #[test]
    fn ticks_stay_inside_range() {
        let ticks = ticks(Range::new(4.0, 11.0), 5, &AxisFormatter::Default);
        let values: Vec<f64> = ticks.iter().map(|tick| tick.value).collect();
        assert_eq!(values, vec![4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks[0].label, "4");
    }

    #[test]
    fn default_formatter_uses_step_precision() {
        let formatter = AxisFormatter::Default;
        assert_eq!(formatter.format(0.25, 0.05), "0.25");
        assert_eq!(formatter.format(-1e-18, 0.5), "0.0");
        assert_eq!(formatter.format(1500.0, 500.0), "1500");
    }

    #[test]
    fn custom_formatter_is_used() {
        let formatter = AxisFormatter::Custom(Arc::new(|value| format!("{value}s")));
        assert_eq!(formatter.format(3.0, 1.0), "3s");
    }
}

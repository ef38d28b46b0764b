//! Plot tunables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::ScrollWindow;

/// Maximum number of samples kept in a series by default.
pub const DEFAULT_MAX_SAMPLES: usize = 2000;
/// Number of samples evicted at once when the series is full.
pub const DEFAULT_REMOVE_SAMPLES: usize = 200;

/// Errors raised by an invalid [`DebugPlotConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The series must be able to hold at least one sample.
    #[error("max_samples must be greater than zero")]
    ZeroMaxSamples,
    /// Eviction must remove at least one sample.
    #[error("remove_samples must be greater than zero")]
    ZeroRemoveSamples,
    /// Eviction cannot remove more than the series holds.
    #[error("remove_samples ({remove}) exceeds max_samples ({max})")]
    RemoveExceedsMax {
        /// Configured eviction batch.
        remove: usize,
        /// Configured capacity.
        max: usize,
    },
    /// The auto-scroll window must be finite and non-empty.
    #[error("invalid auto-scroll window: {before} before, {after} after")]
    InvalidWindow {
        /// Distance behind the latest sample.
        before: f64,
        /// Distance ahead of the latest sample.
        after: f64,
    },
}

/// Configuration for a [`DebugPlot`](crate::plot::DebugPlot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugPlotConfig {
    /// Maximum number of retained samples.
    pub max_samples: usize,
    /// Samples evicted in one batch once `max_samples` is exceeded.
    pub remove_samples: usize,
    /// X distance shown behind the latest sample while auto-scrolling.
    pub window_before: f64,
    /// X distance shown ahead of the latest sample while auto-scrolling.
    pub window_after: f64,
    /// Start with auto-scroll enabled.
    pub autoscroll: bool,
}

impl DebugPlotConfig {
    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroMaxSamples);
        }
        if self.remove_samples == 0 {
            return Err(ConfigError::ZeroRemoveSamples);
        }
        if self.remove_samples > self.max_samples {
            return Err(ConfigError::RemoveExceedsMax {
                remove: self.remove_samples,
                max: self.max_samples,
            });
        }
        let window_ok = self.window_before.is_finite()
            && self.window_after.is_finite()
            && self.window_before + self.window_after > 0.0;
        if !window_ok {
            return Err(ConfigError::InvalidWindow {
                before: self.window_before,
                after: self.window_after,
            });
        }
        Ok(())
    }

    /// Auto-scroll window described by this configuration.
    pub fn scroll_window(&self) -> ScrollWindow {
        ScrollWindow {
            before: self.window_before,
            after: self.window_after,
        }
    }
}

impl Default for DebugPlotConfig {
    fn default() -> Self {
        let window = ScrollWindow::default();
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            remove_samples: DEFAULT_REMOVE_SAMPLES,
            window_before: window.before,
            window_after: window.after,
            autoscroll: true,
        }
    }
}

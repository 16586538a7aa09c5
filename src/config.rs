//! Caller-supplied options for one crop plan.

use crate::geometry::TargetRatio;
use crate::normalize::RATIO_TOLERANCE;

/// Options controlling [`plan`](crate::plan()).
///
/// ```
/// use regionfit::{CropOptions, TargetRatio};
///
/// let options = CropOptions::new()
///     .target_ratio(TargetRatio::STANDARD)
///     .normalize(false);
///
/// assert!(!options.normalize);
/// assert_eq!(options.tolerance, regionfit::RATIO_TOLERANCE);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropOptions {
    /// Ratio the final region should match. Defaults to 16:9.
    pub target_ratio: TargetRatio,
    /// When false, the sanitized region passes through unchanged.
    pub normalize: bool,
    /// Accepted `|ratio - target|`. Defaults to [`RATIO_TOLERANCE`].
    pub tolerance: f64,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            target_ratio: TargetRatio::WIDESCREEN,
            normalize: true,
            tolerance: RATIO_TOLERANCE,
        }
    }
}

impl CropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target ratio.
    pub fn target_ratio(mut self, ratio: TargetRatio) -> Self {
        self.target_ratio = ratio;
        self
    }

    /// Enable or disable ratio normalization.
    pub fn normalize(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    /// Set the ratio tolerance. Non-positive or non-finite values are ignored.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance > 0.0 {
            self.tolerance = tolerance;
        }
        self
    }
}

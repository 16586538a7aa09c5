//! Error types for region repair and ratio configuration.

use core::fmt;

/// Canvas axis a region coordinate belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal (`x_min`, `x_max`, canvas width).
    X,
    /// Vertical (`y_min`, `y_max`, canvas height).
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Region computation error.
///
/// Only true impossibility surfaces here. Out-of-canvas or inverted
/// coordinates are repaired silently and recorded in
/// [`Repairs`](crate::Repairs) instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// Canvas has zero width or height.
    #[error("canvas has zero width or height")]
    ZeroCanvas,
    /// No valid span fits on `axis`, even with the minimum fallback span.
    ///
    /// Happens when the clamped start coordinate sits on the canvas edge.
    #[error("canvas too small on {axis} axis: span starting at {start} cannot fit within {extent}px")]
    DegenerateCanvas {
        /// Axis that could not be repaired.
        axis: Axis,
        /// Clamped start coordinate on that axis.
        start: u32,
        /// Canvas extent on that axis.
        extent: u32,
    },
    /// Target ratio is zero, negative, or not finite.
    #[error("target ratio must be a positive finite number")]
    InvalidTargetRatio,
}

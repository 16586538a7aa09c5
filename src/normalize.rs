//! Aspect-ratio normalization of a valid region.
//!
//! Two phases. Phase A grows the short dimension in one step, symmetrically
//! around the region and collapsing against the far canvas edge instead of
//! overflowing it. Integer rounding leaves a residual error, which phase B
//! removes by moving edges one pixel at a time.
//!
//! # Example
//!
//! ```
//! use regionfit::{Canvas, Region, TargetRatio, normalize, RATIO_TOLERANCE};
//!
//! let canvas = Canvas::new(1000, 1000).unwrap();
//! let region = Region::within(canvas, 100, 100, 300, 400).unwrap();
//!
//! let out = normalize(region, canvas, TargetRatio::WIDESCREEN);
//! assert!(out.report.ratio_error <= RATIO_TOLERANCE);
//! assert!(canvas.contains(&out.region));
//! assert!(out.report.warning.is_none());
//! ```

use core::fmt;

use num_traits::Float;

use crate::geometry::{Canvas, Region, TargetRatio, round_half_up};
use crate::log;

/// Largest accepted `|ratio - target|` for a normalized region.
pub const RATIO_TOLERANCE: f64 = 1e-4;

/// Non-fatal outcome attached to an [`AdjustmentReport`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NormalizeWarning {
    /// Canvas bounds stopped pixel stepping before the ratio came within
    /// tolerance. The report carries the closest region found.
    RatioUnreachable {
        /// `|achieved - target|` of the returned region.
        residual: f64,
    },
}

/// What normalization did to a region. Diagnostic only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AdjustmentReport {
    /// Region before normalization.
    pub original: Region,
    /// Region after normalization.
    pub adjusted: Region,
    pub target_ratio: f64,
    pub achieved_ratio: f64,
    /// `|achieved_ratio - target_ratio|`.
    pub ratio_error: f64,
    /// Signed width change in pixels.
    pub width_delta: i64,
    /// Signed height change in pixels.
    pub height_delta: i64,
    /// Width change relative to the original width, in percent.
    pub width_change_percent: f64,
    /// Height change relative to the original height, in percent.
    pub height_change_percent: f64,
    /// Single-pixel moves made by phase B.
    pub pixel_steps: u32,
    pub warning: Option<NormalizeWarning>,
}

impl AdjustmentReport {
    /// Measure the change from `original` to `adjusted` against `target`.
    ///
    /// Sets no warning; [`normalize`] attaches one when it gives up.
    pub fn measure(original: Region, adjusted: Region, target: TargetRatio) -> Self {
        let (ow, oh) = (original.width() as i64, original.height() as i64);
        let (aw, ah) = (adjusted.width() as i64, adjusted.height() as i64);
        let achieved = adjusted.ratio();
        Self {
            original,
            adjusted,
            target_ratio: target.get(),
            achieved_ratio: achieved,
            ratio_error: Float::abs(achieved - target.get()),
            width_delta: aw - ow,
            height_delta: ah - oh,
            width_change_percent: (aw - ow) as f64 / ow as f64 * 100.0,
            height_change_percent: (ah - oh) as f64 / oh as f64 * 100.0,
            pixel_steps: 0,
            warning: None,
        }
    }

    /// Whether the region was left as it came in.
    pub fn is_unchanged(&self) -> bool {
        self.original == self.adjusted
    }

    /// Whether the final ratio is within `tolerance` of the target.
    pub fn within(&self, tolerance: f64) -> bool {
        self.ratio_error <= tolerance
    }
}

impl fmt::Display for AdjustmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} -> {} {}x{}, width {:+} ({:+.1}%), height {:+} ({:+.1}%), ratio {:.4} (target {:.4}, error {:.6})",
            self.original,
            self.original.width(),
            self.original.height(),
            self.adjusted,
            self.adjusted.width(),
            self.adjusted.height(),
            self.width_delta,
            self.width_change_percent,
            self.height_delta,
            self.height_change_percent,
            self.achieved_ratio,
            self.target_ratio,
            self.ratio_error,
        )?;
        if let Some(NormalizeWarning::RatioUnreachable { .. }) = self.warning {
            f.write_str(" [ratio unreachable]")?;
        }
        Ok(())
    }
}

/// Normalizer output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalized {
    pub region: Region,
    pub report: AdjustmentReport,
}

/// Reshape `region` toward `target` with the default [`RATIO_TOLERANCE`].
pub fn normalize(region: Region, canvas: Canvas, target: TargetRatio) -> Normalized {
    normalize_with_tolerance(region, canvas, target, RATIO_TOLERANCE)
}

/// Reshape `region` toward `target`, stopping once within `tolerance`.
///
/// `region` must lie inside `canvas`. A non-positive or non-finite
/// `tolerance` falls back to [`RATIO_TOLERANCE`]. Never fails: when the
/// canvas makes the ratio unreachable the closest region found is returned
/// and the report carries [`NormalizeWarning::RatioUnreachable`].
pub fn normalize_with_tolerance(
    region: Region,
    canvas: Canvas,
    target: TargetRatio,
    tolerance: f64,
) -> Normalized {
    debug_assert!(canvas.contains(&region), "{region} outside canvas {canvas:?}");
    let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        RATIO_TOLERANCE
    };
    let t = target.get();

    if ratio_error(region, t) <= tolerance {
        return Normalized {
            region,
            report: AdjustmentReport::measure(region, region, target),
        };
    }

    let grown = grow_to_ratio(region, canvas, t);
    log::debug!(%region, %grown, target = t, "coarse growth");

    let stepped = step_to_ratio(grown, canvas, t, tolerance);
    let mut report = AdjustmentReport::measure(region, stepped.region, target);
    report.pixel_steps = stepped.steps;
    if report.ratio_error > tolerance {
        log::warn!(
            region = %stepped.region,
            residual = report.ratio_error,
            "target ratio unreachable within canvas"
        );
        report.warning = Some(NormalizeWarning::RatioUnreachable {
            residual: report.ratio_error,
        });
    }

    Normalized {
        region: stepped.region,
        report,
    }
}

fn ratio_error(region: Region, target: f64) -> f64 {
    Float::abs(region.ratio() - target)
}

// ============================================================================
// Phase A: coarse growth
// ============================================================================

/// Grow the short dimension so the ratio lands near `target`.
///
/// Only one axis changes. Ratios at or below the target widen, ratios above
/// it heighten.
fn grow_to_ratio(region: Region, canvas: Canvas, target: f64) -> Region {
    let mut r = region;
    if region.ratio() <= target {
        let new_width = round_half_up(region.height() as f64 * target);
        (r.x_min, r.x_max) = expand_span(region.x_min, region.x_max, new_width, canvas.width());
    } else {
        let new_height = round_half_up(region.width() as f64 / target);
        (r.y_min, r.y_max) = expand_span(region.y_min, region.y_max, new_height, canvas.height());
    }
    r
}

/// Expand `[min, max)` to `new_len`, centered, inside `[0, limit]`.
///
/// The half-delta comes off the min side first; an odd remainder ends up on
/// the max side. Past the far edge the span is pinned to `limit` and extends
/// back toward zero instead.
fn expand_span(min: u32, max: u32, new_len: i64, limit: u32) -> (u32, u32) {
    let len = (max - min) as i64;
    let new_len = new_len.max(len);
    let limit = limit as i64;

    let delta = new_len - len;
    let mut lo = (min as i64 - delta / 2).max(0);
    let mut hi = lo + new_len;
    if hi > limit {
        hi = limit;
        lo = (hi - new_len).max(0);
    }
    (lo.clamp(0, limit) as u32, hi.clamp(0, limit) as u32)
}

// ============================================================================
// Phase B: pixel stepping
// ============================================================================

struct Stepped {
    region: Region,
    steps: u32,
}

/// Move edges one pixel at a time until within `tolerance`.
///
/// Too narrow: push `x_max` out, then `x_min` once `x_max` hits the canvas,
/// else pull `y_max` in. Too wide: the same with the axes swapped.
/// Once an axis has been pulled in it never grows again, so each max edge
/// reverses direction at most once and min edges only move outward. The
/// loop ends after at most `3 * (width + height)` moves.
///
/// Returns the lowest-error region seen, which is the last one on convergence.
fn step_to_ratio(region: Region, canvas: Canvas, target: f64, tolerance: f64) -> Stepped {
    let mut r = region;
    let mut best = region;
    let mut best_error = ratio_error(region, target);
    let mut steps = 0u32;
    let mut x_pulled = false;
    let mut y_pulled = false;

    while ratio_error(r, target) > tolerance {
        if r.ratio() < target {
            if !x_pulled && r.x_max < canvas.width() {
                r.x_max += 1;
            } else if !x_pulled && r.x_min > 0 {
                r.x_min -= 1;
            } else if r.y_max > r.y_min + 1 {
                r.y_max -= 1;
                y_pulled = true;
            } else {
                break;
            }
        } else if !y_pulled && r.y_max < canvas.height() {
            r.y_max += 1;
        } else if !y_pulled && r.y_min > 0 {
            r.y_min -= 1;
        } else if r.x_max > r.x_min + 1 {
            r.x_max -= 1;
            x_pulled = true;
        } else {
            break;
        }
        steps += 1;

        let e = ratio_error(r, target);
        if e < best_error {
            best = r;
            best_error = e;
        }
    }

    log::debug!(steps, residual = best_error, "pixel stepping done");
    Stepped {
        region: best,
        steps,
    }
}

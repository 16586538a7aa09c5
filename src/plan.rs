//! One-call pipeline: untrusted region → sanitized → normalized.

use crate::config::CropOptions;
use crate::error::RegionError;
use crate::geometry::{Canvas, RawRegion, Rect, Region};
use crate::normalize::{AdjustmentReport, normalize_with_tolerance};
use crate::sanitize::{Sanitized, sanitize};

/// Result of [`plan`]: every intermediate value plus the final region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropPlan {
    pub canvas: Canvas,
    /// Region as supplied by the caller.
    pub requested: RawRegion,
    /// Sanitizer output and the repairs it made.
    pub sanitized: Sanitized,
    /// Final region handed to pixel extraction.
    pub region: Region,
    /// Normalization report (measured only when normalization is off).
    pub report: AdjustmentReport,
}

impl CropPlan {
    /// Final region as origin + size.
    pub fn crop_rect(&self) -> Rect {
        self.region.to_rect()
    }

    /// Whether the final region differs from what was requested.
    pub fn is_adjusted(&self) -> bool {
        !self.sanitized.repairs.is_empty() || !self.report.is_unchanged()
    }

    /// Whether the final region covers the whole canvas.
    pub fn is_full_canvas(&self) -> bool {
        self.crop_rect().is_full(self.canvas)
    }
}

/// Sanitize `requested` against a `canvas_w`×`canvas_h` canvas, then
/// normalize it per `options`.
///
/// ```
/// use regionfit::{CropOptions, RawRegion, plan};
///
/// let p = plan(1000, 1000, RawRegion::new(100, 100, 300, 400), &CropOptions::default()).unwrap();
/// assert!(p.report.warning.is_none());
/// assert!(p.is_adjusted());
/// ```
pub fn plan(
    canvas_w: u32,
    canvas_h: u32,
    requested: RawRegion,
    options: &CropOptions,
) -> Result<CropPlan, RegionError> {
    let canvas = Canvas::new(canvas_w, canvas_h)?;
    let sanitized = sanitize(requested, canvas)?;

    let (region, report) = if options.normalize {
        let n = normalize_with_tolerance(
            sanitized.region,
            canvas,
            options.target_ratio,
            options.tolerance,
        );
        (n.region, n.report)
    } else {
        let r = sanitized.region;
        (r, AdjustmentReport::measure(r, r, options.target_ratio))
    };

    Ok(CropPlan {
        canvas,
        requested,
        sanitized,
        region,
        report,
    })
}

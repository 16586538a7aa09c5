//! Repair of untrusted regions into valid ones.
//!
//! Minimum intervention: coordinates are clamped into the canvas, and an
//! inverted or empty span is replaced by a short fallback span starting at
//! the clamped minimum. No attempt is made to guess what the source meant.

use crate::error::{Axis, RegionError};
use crate::geometry::{Canvas, RawRegion, Region};
use crate::log;

/// Length of the fallback span used when an axis is inverted or empty.
pub const MIN_SPAN: u32 = 10;

/// Which repairs [`sanitize`] applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Repairs {
    /// An x coordinate was outside `[0, width]`.
    pub clamped_x: bool,
    /// A y coordinate was outside `[0, height]`.
    pub clamped_y: bool,
    /// The x span was inverted or empty and got the fallback span.
    pub widened_x: bool,
    /// The y span was inverted or empty and got the fallback span.
    pub widened_y: bool,
}

impl Repairs {
    /// True when the input was already valid.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sanitizer output: the repaired region and what was done to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sanitized {
    pub region: Region,
    pub repairs: Repairs,
}

/// Repair `raw` into a region inside `canvas`.
///
/// A valid input comes back unchanged with empty [`Repairs`]. Fails only with
/// [`RegionError::DegenerateCanvas`], when an axis start clamps onto the
/// canvas edge and leaves no room for any span.
///
/// ```
/// use regionfit::{Canvas, RawRegion, sanitize};
///
/// let canvas = Canvas::new(100, 100).unwrap();
/// let fixed = sanitize(RawRegion::new(10, 10, 10, 20), canvas).unwrap();
///
/// assert_eq!(fixed.region.x_max(), 20);
/// assert!(fixed.repairs.widened_x);
/// ```
pub fn sanitize(raw: RawRegion, canvas: Canvas) -> Result<Sanitized, RegionError> {
    let x = repair_span(raw.x_min, raw.x_max, canvas.width(), Axis::X)?;
    let y = repair_span(raw.y_min, raw.y_max, canvas.height(), Axis::Y)?;

    let repairs = Repairs {
        clamped_x: x.clamped,
        clamped_y: y.clamped,
        widened_x: x.widened,
        widened_y: y.widened,
    };
    let region = Region {
        x_min: x.min,
        y_min: y.min,
        x_max: x.max,
        y_max: y.max,
    };

    if !repairs.is_empty() {
        log::debug!(?raw, ?repairs, %region, "repaired untrusted region");
    }

    Ok(Sanitized { region, repairs })
}

/// One axis of a repaired region.
struct Span {
    min: u32,
    max: u32,
    clamped: bool,
    widened: bool,
}

fn repair_span(min: i64, max: i64, extent: u32, axis: Axis) -> Result<Span, RegionError> {
    let limit = extent as i64;
    let lo = min.clamp(0, limit);
    let mut hi = max.clamp(0, limit);
    let clamped = lo != min || hi != max;

    let mut widened = false;
    if lo >= hi {
        hi = (lo + MIN_SPAN as i64).min(limit);
        widened = true;
        if lo >= hi {
            return Err(RegionError::DegenerateCanvas {
                axis,
                start: lo as u32,
                extent,
            });
        }
    }

    Ok(Span {
        min: lo as u32,
        max: hi as u32,
        clamped,
        widened,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> Canvas {
        Canvas::new(w, h).unwrap()
    }

    fn corners(r: Region) -> (u32, u32, u32, u32) {
        (r.x_min(), r.y_min(), r.x_max(), r.y_max())
    }

    #[test]
    fn valid_region_is_unchanged() {
        let s = sanitize(RawRegion::new(100, 100, 300, 400), canvas(1000, 1000)).unwrap();
        assert_eq!(corners(s.region), (100, 100, 300, 400));
        assert!(s.repairs.is_empty());
    }

    #[test]
    fn full_canvas_is_unchanged() {
        let s = sanitize(RawRegion::new(0, 0, 640, 480), canvas(640, 480)).unwrap();
        assert_eq!(s.region, canvas(640, 480).full());
        assert!(s.repairs.is_empty());
    }

    #[test]
    fn zero_width_gets_fallback_span() {
        let s = sanitize(RawRegion::new(10, 10, 10, 20), canvas(100, 100)).unwrap();
        assert_eq!(corners(s.region), (10, 10, 20, 20));
        assert!(s.repairs.widened_x);
        assert!(!s.repairs.widened_y);
        assert!(!s.repairs.clamped_x);
    }

    #[test]
    fn inverted_axes_get_fallback_span() {
        let s = sanitize(RawRegion::new(50, 70, 20, 30), canvas(100, 100)).unwrap();
        assert_eq!(corners(s.region), (50, 70, 60, 80));
        assert!(s.repairs.widened_x && s.repairs.widened_y);
    }

    #[test]
    fn negative_and_overflowing_coordinates_clamp() {
        let s = sanitize(RawRegion::new(-40, -1, 5000, 120), canvas(800, 100)).unwrap();
        assert_eq!(corners(s.region), (0, 0, 800, 100));
        assert!(s.repairs.clamped_x && s.repairs.clamped_y);
        assert!(!s.repairs.widened_x && !s.repairs.widened_y);
    }

    #[test]
    fn fallback_span_stops_at_canvas_edge() {
        // Only 4px remain to the right of x_min.
        let s = sanitize(RawRegion::new(96, 0, 90, 50), canvas(100, 100)).unwrap();
        assert_eq!(corners(s.region), (96, 0, 100, 50));
    }

    #[test]
    fn entirely_negative_region_collapses_to_origin_span() {
        let s = sanitize(RawRegion::new(-50, -50, -10, -10), canvas(100, 100)).unwrap();
        assert_eq!(corners(s.region), (0, 0, 10, 10));
        assert!(s.repairs.clamped_x && s.repairs.widened_x);
    }

    #[test]
    fn start_on_right_edge_is_degenerate() {
        let err = sanitize(RawRegion::new(100, 0, 120, 50), canvas(100, 100)).unwrap_err();
        assert_eq!(
            err,
            RegionError::DegenerateCanvas {
                axis: Axis::X,
                start: 100,
                extent: 100
            }
        );
    }

    #[test]
    fn start_below_bottom_edge_is_degenerate() {
        let err = sanitize(RawRegion::new(0, 500, 50, 600), canvas(100, 100)).unwrap_err();
        assert!(matches!(
            err,
            RegionError::DegenerateCanvas { axis: Axis::Y, start: 100, .. }
        ));
    }

    #[test]
    fn one_pixel_canvas() {
        let s = sanitize(RawRegion::new(0, 0, 0, 0), canvas(1, 1)).unwrap();
        assert_eq!(corners(s.region), (0, 0, 1, 1));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let c = canvas(300, 200);
        let inputs = [
            RawRegion::new(-10, -10, 400, 400),
            RawRegion::new(299, 199, 0, 0),
            RawRegion::new(5, 5, 5, 5),
            RawRegion::new(150, 20, 160, 30),
        ];
        for raw in inputs {
            let once = sanitize(raw, c).unwrap();
            let twice = sanitize(once.region.into(), c).unwrap();
            assert_eq!(once.region, twice.region, "{raw}");
            assert!(twice.repairs.is_empty(), "{raw}");
        }
    }
}

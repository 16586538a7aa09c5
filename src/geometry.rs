//! Value types: canvas bounds, untrusted and validated regions, target ratio.
//!
//! Pure geometry. No allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use regionfit::{Canvas, Region, TargetRatio};
//!
//! let canvas = Canvas::new(1920, 1080).unwrap();
//! let region = Region::within(canvas, 0, 0, 1600, 900).unwrap();
//!
//! assert_eq!(region.width(), 1600);
//! assert!((region.ratio() - TargetRatio::WIDESCREEN.get()).abs() < 1e-9);
//! ```

use core::fmt;

use crate::error::RegionError;

/// Bitmap bounds a region is defined against. Both sides are non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create canvas bounds, rejecting a zero side.
    pub const fn new(width: u32, height: u32) -> Result<Self, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::ZeroCanvas);
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `region` lies entirely within these bounds.
    pub const fn contains(&self, region: &Region) -> bool {
        region.x_max <= self.width && region.y_max <= self.height
    }

    /// The region covering the whole canvas.
    pub const fn full(&self) -> Region {
        Region {
            x_min: 0,
            y_min: 0,
            x_max: self.width,
            y_max: self.height,
        }
    }
}

/// Candidate region as reported by an untrusted source.
///
/// Coordinates may be negative, inverted, or beyond the canvas.
/// Run it through [`sanitize`](crate::sanitize) to get a [`Region`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawRegion {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl RawRegion {
    /// Create a raw region from corner coordinates.
    pub const fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl From<Region> for RawRegion {
    fn from(r: Region) -> Self {
        Self {
            x_min: r.x_min as i64,
            y_min: r.y_min as i64,
            x_max: r.x_max as i64,
            y_max: r.y_max as i64,
        }
    }
}

impl fmt::Display for RawRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Validated region in pixel coordinates.
///
/// Always non-empty: `x_min < x_max` and `y_min < y_max`. Obtained from
/// [`sanitize`](crate::sanitize) or [`Region::within`], both of which also
/// guarantee the region lies inside its canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub(crate) x_min: u32,
    pub(crate) y_min: u32,
    pub(crate) x_max: u32,
    pub(crate) y_max: u32,
}

impl Region {
    /// Checked constructor: `None` unless the region is non-empty and inside `canvas`.
    pub const fn within(canvas: Canvas, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Option<Self> {
        if x_min < x_max && y_min < y_max && x_max <= canvas.width && y_max <= canvas.height {
            Some(Self {
                x_min,
                y_min,
                x_max,
                y_max,
            })
        } else {
            None
        }
    }

    pub const fn x_min(&self) -> u32 {
        self.x_min
    }

    pub const fn y_min(&self) -> u32 {
        self.y_min
    }

    pub const fn x_max(&self) -> u32 {
        self.x_max
    }

    pub const fn y_max(&self) -> u32 {
        self.y_max
    }

    /// Width in pixels (always ≥ 1).
    pub const fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    /// Height in pixels (always ≥ 1).
    pub const fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// Width / height.
    pub fn ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    /// Center point, rounded down.
    pub const fn center(&self) -> (u32, u32) {
        (
            self.x_min + self.width() / 2,
            self.y_min + self.height() / 2,
        )
    }

    /// Origin + size form for pixel extraction.
    pub const fn to_rect(&self) -> Rect {
        Rect {
            x: self.x_min,
            y: self.y_min,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Axis-aligned rectangle as origin + size, the form crop APIs take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this rect covers the full canvas (no actual crop).
    pub fn is_full(&self, canvas: Canvas) -> bool {
        self.x == 0 && self.y == 0 && self.width == canvas.width && self.height == canvas.height
    }
}

/// Desired width / height of the final region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetRatio(f64);

impl TargetRatio {
    /// 16:9.
    pub const WIDESCREEN: Self = Self(16.0 / 9.0);
    /// 4:3.
    pub const STANDARD: Self = Self(4.0 / 3.0);
    /// 1:1.
    pub const SQUARE: Self = Self(1.0);

    /// Ratio from a `width:height` pair, e.g. `TargetRatio::new(16, 9)`.
    pub fn new(width: u32, height: u32) -> Result<Self, RegionError> {
        if width == 0 || height == 0 {
            return Err(RegionError::InvalidTargetRatio);
        }
        Ok(Self(width as f64 / height as f64))
    }

    /// Ratio from a decimal value. Must be positive and finite.
    pub fn from_f64(ratio: f64) -> Result<Self, RegionError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(RegionError::InvalidTargetRatio)
        }
    }

    /// The ratio as a decimal.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for TargetRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Round half up: `floor(v + 0.5)`.
///
/// Differs from `f64::round` on negative ties; callers only pass
/// non-negative values.
pub(crate) fn round_half_up(v: f64) -> i64 {
    num_traits::Float::floor(v + 0.5) as i64
}

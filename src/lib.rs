//! Crop region repair and aspect-ratio normalization.
//!
//! Takes a bounding box reported by an untrusted source (a vision classifier,
//! say), repairs it into a valid region inside the bitmap, then reshapes it to
//! a target aspect ratio while staying inside the bitmap and changing it as
//! little as possible.
//!
//! Pure geometry: no pixel operations, no I/O. The core is `no_std`
//! compatible and allocation-free.
//!
//! # Modules
//!
//! - [`geometry`]: Canvas, raw and validated regions, target ratio
//! - [`sanitize`](mod@sanitize): Repair of untrusted regions
//! - [`normalize`](mod@normalize): Two-phase aspect-ratio normalization and its report
//! - [`plan`](mod@plan): Sanitize + normalize in one call
//! - `options`: Query-string option parsing (feature `options`)
//! - `reply`: Classifier reply parsing (feature `reply`)
//!
//! # Example
//!
//! ```
//! use regionfit::{CropOptions, RawRegion, plan};
//!
//! // Classifier said (10,10)-(10,20): zero width.
//! let p = plan(100, 100, RawRegion::new(10, 10, 10, 20), &CropOptions::default()).unwrap();
//!
//! assert!(p.sanitized.repairs.widened_x);
//! assert!(p.report.warning.is_none());
//! let rect = p.crop_rect();
//! assert!(rect.x + rect.width <= 100 && rect.y + rect.height <= 100);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod config;
pub mod error;
pub mod geometry;
mod log;
pub mod normalize;
pub mod plan;
pub mod sanitize;

#[cfg(feature = "options")]
pub mod options;
#[cfg(feature = "reply")]
pub mod reply;

pub use config::CropOptions;
pub use error::{Axis, RegionError};
pub use geometry::{Canvas, RawRegion, Rect, Region, TargetRatio};
pub use normalize::{
    AdjustmentReport, NormalizeWarning, Normalized, RATIO_TOLERANCE, normalize,
    normalize_with_tolerance,
};
pub use plan::{CropPlan, plan};
pub use sanitize::{MIN_SPAN, Repairs, Sanitized, sanitize};

//! Query-string option parsing.
//!
//! Parses strings like `?ratio=4:3&normalize=off` into [`CropOptions`].
//!
//! # Example
//!
//! ```
//! use regionfit::{TargetRatio, options};
//!
//! let result = options::parse("ratio=4:3&normalize=off");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.options.target_ratio, TargetRatio::STANDARD);
//! assert!(!result.options.normalize);
//! ```
//!
//! # Keys
//!
//! | key | value |
//! |---|---|
//! | `ratio`, `aspect`, `ar` | `16:9`, `16x9`, `16/9` or a decimal |
//! | `normalize`, `adjust` | `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` |
//! | `tolerance`, `tol` | positive decimal |

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::CropOptions;

/// Result of parsing an option query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed options, defaults where a key was absent or invalid.
    pub options: CropOptions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from option parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse an option query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (options, warnings) = parse::parse_query(query);
    ParseResult { options, warnings }
}

/// Parse a single ratio value (`16:9`, `16x9`, `16/9`, `1.7778`).
pub fn parse_ratio(value: &str) -> Option<crate::TargetRatio> {
    parse::parse_ratio(value)
}

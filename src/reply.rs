//! Parsing of vision-classifier replies into untrusted regions.
//!
//! The classifier is asked for a JSON object but answers in free text: the
//! object may sit inside a fenced code block, be surrounded by prose, or use
//! single quotes. Nothing here validates geometry; the result is a
//! [`RawRegion`] for [`sanitize`](crate::sanitize).
//!
//! ```
//! use regionfit::reply::parse_reply;
//!
//! let text = r#"Here you go:
//! {"crop_coordinates": {"x_min": 10, "y_min": 20, "x_max": 300, "y_max": 200},
//!  "description": "the red car"}"#;
//!
//! let reply = parse_reply(text).unwrap();
//! assert_eq!(reply.region.x_max, 300);
//! assert_eq!(reply.description.as_deref(), Some("the red car"));
//! ```

use serde::Deserialize;
use serde_json::error::Category;

use crate::geometry::RawRegion;
use crate::log;

/// Reply parsing error.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    /// The text contains no `{ ... }` span or fenced JSON block.
    #[error("no JSON object found in classifier reply")]
    NoJson,
    /// The extracted JSON is malformed or lacks required fields.
    #[error("malformed classifier reply: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed classifier reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierReply {
    /// Region as reported. Untrusted.
    pub region: RawRegion,
    /// Free-text description of the region, if the classifier gave one.
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    crop_coordinates: Coordinates,
    #[serde(default)]
    description: Option<String>,
}

/// Coordinates arrive as integers or decimals; decimals truncate toward zero.
#[derive(Deserialize)]
struct Coordinates {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl From<Coordinates> for RawRegion {
    fn from(c: Coordinates) -> Self {
        RawRegion::new(c.x_min as i64, c.y_min as i64, c.x_max as i64, c.y_max as i64)
    }
}

/// Extract and parse the JSON object in a classifier reply.
///
/// If strict parsing fails on a syntax error, retries once with single
/// quotes swapped for double quotes; when that also fails the first error is
/// returned. Well-formed JSON with missing or mistyped fields is not retried.
pub fn parse_reply(text: &str) -> Result<ClassifierReply, ReplyError> {
    let json = extract_json(text).ok_or(ReplyError::NoJson)?;

    let envelope = match serde_json::from_str::<Envelope>(json) {
        Ok(e) => e,
        Err(first) if first.classify() == Category::Syntax => {
            log::debug!(error = %first, "strict reply parse failed, retrying with double quotes");
            serde_json::from_str::<Envelope>(&json.replace('\'', "\"")).map_err(|_| first)?
        }
        Err(e) => return Err(e.into()),
    };

    Ok(ClassifierReply {
        region: envelope.crop_coordinates.into(),
        description: envelope.description,
    })
}

/// Locate the JSON payload: a fenced json block if present, else the span
/// from the first `{` to the last `}`.
fn extract_json(text: &str) -> Option<&str> {
    const FENCE: &str = "```json";
    if let Some(start) = text.find(FENCE) {
        let body = &text[start + FENCE.len()..];
        let end = body.find("```").unwrap_or(body.len());
        let json = body[..end].trim();
        return (!json.is_empty()).then_some(json);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| text[start..=end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json() {
        let r = parse_reply(
            r#"{"crop_coordinates": {"x_min": 1, "y_min": 2, "x_max": 3, "y_max": 4}, "description": "box"}"#,
        )
        .unwrap();
        assert_eq!(r.region, RawRegion::new(1, 2, 3, 4));
        assert_eq!(r.description.as_deref(), Some("box"));
    }

    #[test]
    fn fenced_block_with_prose() {
        let text = "Sure!\n```json\n{\"crop_coordinates\": {\"x_min\": 5, \"y_min\": 6, \"x_max\": 70, \"y_max\": 80}}\n```\nAnything else?";
        let r = parse_reply(text).unwrap();
        assert_eq!(r.region, RawRegion::new(5, 6, 70, 80));
        assert_eq!(r.description, None);
    }

    #[test]
    fn unterminated_fence_takes_rest() {
        let text = "```json\n{\"crop_coordinates\": {\"x_min\": 0, \"y_min\": 0, \"x_max\": 9, \"y_max\": 9}}";
        assert_eq!(parse_reply(text).unwrap().region, RawRegion::new(0, 0, 9, 9));
    }

    #[test]
    fn single_quotes_are_repaired() {
        let text = "{'crop_coordinates': {'x_min': 10, 'y_min': 20, 'x_max': 30, 'y_max': 40}, 'description': 'dog'}";
        let r = parse_reply(text).unwrap();
        assert_eq!(r.region, RawRegion::new(10, 20, 30, 40));
        assert_eq!(r.description.as_deref(), Some("dog"));
    }

    #[test]
    fn decimals_truncate_and_negatives_survive() {
        let text = r#"{"crop_coordinates": {"x_min": -12.7, "y_min": 3.9, "x_max": 1e3, "y_max": 55.5}}"#;
        assert_eq!(parse_reply(text).unwrap().region, RawRegion::new(-12, 3, 1000, 55));
    }

    #[test]
    fn inverted_coordinates_pass_through_untouched() {
        let text = r#"{"crop_coordinates": {"x_min": 300, "y_min": 200, "x_max": 10, "y_max": 5}}"#;
        assert_eq!(parse_reply(text).unwrap().region, RawRegion::new(300, 200, 10, 5));
    }

    #[test]
    fn missing_field_is_an_error() {
        let text = r#"{"crop_coordinates": {"x_min": 1, "y_min": 2, "x_max": 3}}"#;
        let err = parse_reply(text).unwrap_err();
        assert!(matches!(err, ReplyError::Json(_)));
        assert!(err.to_string().contains("y_max"), "{err}");
    }

    #[test]
    fn missing_envelope_is_an_error() {
        let err = parse_reply(r#"{"x_min": 1, "y_min": 2, "x_max": 3, "y_max": 4}"#).unwrap_err();
        assert!(matches!(err, ReplyError::Json(_)));
    }

    #[test]
    fn wrong_field_type_is_not_retried() {
        // The apostrophe would turn into a stray quote on a retry.
        let text = r#"{"crop_coordinates": {"x_min": "ten", "y_min": 2, "x_max": 3, "y_max": 4}, "description": "the dog's ball"}"#;
        match parse_reply(text) {
            Err(ReplyError::Json(e)) => assert_eq!(e.classify(), Category::Data, "{e}"),
            other => panic!("expected a data error, got {other:?}"),
        }
    }

    #[test]
    fn no_json_at_all() {
        assert!(matches!(parse_reply("I cannot help with that."), Err(ReplyError::NoJson)));
        assert!(matches!(parse_reply("} backwards {"), Err(ReplyError::NoJson)));
        assert!(matches!(parse_reply("```json\n```"), Err(ReplyError::NoJson)));
    }

    #[test]
    fn garbage_between_braces_reports_first_error() {
        let err = parse_reply("{not json at all}").unwrap_err();
        assert!(matches!(err, ReplyError::Json(_)));
    }
}

//! End to end: classifier reply text + option query → crop rectangle.

#![cfg(all(feature = "reply", feature = "options"))]

use regionfit::reply::{ReplyError, parse_reply};
use regionfit::{CropPlan, Rect, RegionError, options, plan};

fn crop(reply: &str, query: &str, w: u32, h: u32) -> CropPlan {
    let parsed = options::parse(query);
    assert!(parsed.warnings.is_empty(), "{query:?}: {:?}", parsed.warnings);
    let reply = parse_reply(reply).unwrap_or_else(|e| panic!("reply {reply:?}: {e}"));
    plan(w, h, reply.region, &parsed.options).unwrap_or_else(|e| panic!("plan: {e}"))
}

#[test]
fn zero_width_reply_is_widened_then_normalized() {
    let p = crop(
        r#"{"crop_coordinates": {"x_min": 10, "y_min": 10, "x_max": 10, "y_max": 20}}"#,
        "",
        100,
        100,
    );
    assert!(p.sanitized.repairs.widened_x);
    assert_eq!(p.crop_rect(), Rect::new(6, 10, 32, 18));
    assert!(p.report.warning.is_none());
}

#[test]
fn out_of_bounds_reply_in_prose() {
    let text = "The main subject is the cyclist.\n```json\n\
        {\"crop_coordinates\": {\"x_min\": -50, \"y_min\": -20, \"x_max\": 500, \"y_max\": 300},\n \
        \"description\": \"cyclist\"}\n```";
    let p = crop(text, "?ratio=16:9", 640, 480);

    assert!(p.sanitized.repairs.clamped_x && p.sanitized.repairs.clamped_y);
    assert_eq!(p.crop_rect(), Rect::new(0, 0, 544, 306));
    assert_eq!(p.report.pixel_steps, 17);
    assert!(p.report.within(1e-4));
}

#[test]
fn single_quoted_reply_with_square_ratio() {
    let text = "{'crop_coordinates': {'x_min': 100, 'y_min': 100, 'x_max': 300, 'y_max': 150}}";
    let p = crop(text, "ratio=1:1", 640, 480);
    assert_eq!(p.crop_rect(), Rect::new(100, 25, 200, 200));
    assert_eq!(p.report.height_delta, 150);
    assert_eq!(p.report.width_delta, 0);
}

#[test]
fn normalization_can_be_switched_off() {
    let text = r#"{"crop_coordinates": {"x_min": 0, "y_min": 0, "x_max": 500, "y_max": 300}}"#;

    let adjusted = crop(text, "ratio=4:3", 640, 480);
    assert_eq!(adjusted.crop_rect(), Rect::new(0, 0, 500, 375));

    let raw = crop(text, "ratio=4:3&normalize=off", 640, 480);
    assert_eq!(raw.crop_rect(), Rect::new(0, 0, 500, 300));
    assert!(!raw.is_adjusted());
}

#[test]
fn report_display_reads_as_a_log_line() {
    let p = crop(
        r#"{"crop_coordinates": {"x_min": 100, "y_min": 100, "x_max": 300, "y_max": 150}}"#,
        "ar=1",
        640,
        480,
    );
    let line = p.report.to_string();
    assert!(line.contains("200x50 -> "), "{line}");
    assert!(line.contains("200x200"), "{line}");
    assert!(line.contains("height +150 (+300.0%)"), "{line}");
    assert!(!line.contains("unreachable"), "{line}");
}

#[test]
fn region_past_the_canvas_edge_is_an_error() {
    let text = r#"{"crop_coordinates": {"x_min": 700, "y_min": 0, "x_max": 900, "y_max": 100}}"#;
    let reply = parse_reply(text).unwrap();
    let err = plan(640, 480, reply.region, &Default::default()).unwrap_err();
    assert!(matches!(err, RegionError::DegenerateCanvas { start: 640, .. }), "{err}");
}

#[test]
fn refusal_text_has_no_region() {
    let err = parse_reply("I'm sorry, I can't identify a subject in this image.").unwrap_err();
    assert!(matches!(err, ReplyError::NoJson));
}

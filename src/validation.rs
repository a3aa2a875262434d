//! Field rules for calendar events.
//!
//! Every rule is checked independently so a single response can report all
//! offending fields. The only cross-field rule, `endTime` after `startTime`,
//! runs once both times are well formed.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{EventFields, EventPayload};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

static DATE_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();
static COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid date regex"))
}

fn time_pattern() -> &'static Regex {
    TIME_RE.get_or_init(|| {
        Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("invalid time regex")
    })
}

fn color_pattern() -> &'static Regex {
    COLOR_RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("invalid color regex"))
}

/// A single rule violation, keyed by the JSON field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event fields: {}", field_names(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn field_names(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts a well-formed `HH:MM` value to minutes since midnight.
pub fn minutes_since_midnight(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Checks a raw payload and returns the fields ready for storage.
pub fn validate_event(payload: EventPayload) -> Result<EventFields, ValidationErrors> {
    let mut errors = Vec::new();
    let description = payload.description.unwrap_or_default();

    let title_len = payload.title.chars().count();
    if title_len == 0 {
        errors.push(FieldError::new("title", "Title must not be empty"));
    } else if title_len > MAX_TITLE_LENGTH {
        errors.push(FieldError::new(
            "title",
            format!("Title must be at most {} characters", MAX_TITLE_LENGTH),
        ));
    }

    if !date_pattern().is_match(&payload.date) {
        errors.push(FieldError::new("date", "Date must use the YYYY-MM-DD format"));
    }

    let start_ok = time_pattern().is_match(&payload.start_time);
    if !start_ok {
        errors.push(FieldError::new(
            "startTime",
            "Start time must use the HH:MM format",
        ));
    }

    let end_ok = time_pattern().is_match(&payload.end_time);
    if !end_ok {
        errors.push(FieldError::new("endTime", "End time must use the HH:MM format"));
    }

    if start_ok && end_ok {
        let start = minutes_since_midnight(&payload.start_time);
        let end = minutes_since_midnight(&payload.end_time);
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(FieldError::new("endTime", "End time must be after start time"));
            }
        }
    }

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        errors.push(FieldError::new(
            "description",
            format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            ),
        ));
    }

    if !color_pattern().is_match(&payload.color) {
        errors.push(FieldError::new(
            "color",
            "Color must be a hex code like #3B82F6",
        ));
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(EventFields {
        title: payload.title,
        date: payload.date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        description,
        color: payload.color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_COLOR;
    use pretty_assertions::assert_eq;

    fn payload() -> EventPayload {
        EventPayload {
            title: "Test Meeting".to_string(),
            date: "2024-12-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            description: Some("Test description".to_string()),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    fn rejected_fields(payload: EventPayload) -> Vec<&'static str> {
        validate_event(payload)
            .expect_err("payload should be rejected")
            .0
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn accepts_valid_event() {
        let fields = validate_event(payload()).unwrap();
        assert_eq!(fields.title, "Test Meeting");
        assert_eq!(fields.description, "Test description");
    }

    #[test]
    fn missing_description_becomes_empty() {
        let mut p = payload();
        p.description = None;
        assert_eq!(validate_event(p).unwrap().description, "");
    }

    #[test]
    fn title_length_bounds() {
        for (len, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let mut p = payload();
            p.title = "x".repeat(len);
            assert_eq!(validate_event(p).is_ok(), ok, "title length {}", len);
        }
    }

    #[test]
    fn title_counts_characters_not_bytes() {
        let mut p = payload();
        p.title = "é".repeat(100);
        assert!(validate_event(p).is_ok());
    }

    #[test]
    fn date_is_format_only() {
        let mut p = payload();
        p.date = "2024-02-31".to_string();
        assert!(validate_event(p).is_ok());

        let mut p = payload();
        p.date = "12/15/2024".to_string();
        assert_eq!(rejected_fields(p), vec!["date"]);
    }

    #[test]
    fn time_format() {
        for (time, ok) in [
            ("9:00", true),
            ("23:59", true),
            ("00:00", true),
            ("24:00", false),
            ("09:60", false),
            ("9:00am", false),
            ("0900", false),
        ] {
            assert_eq!(time_pattern().is_match(time), ok, "time {}", time);
        }

        let mut p = payload();
        p.start_time = "9:00am".to_string();
        assert_eq!(rejected_fields(p), vec!["startTime"]);
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let mut p = payload();
        p.start_time = "09:00".to_string();
        p.end_time = "09:00".to_string();

        let err = validate_event(p).unwrap_err();
        assert_eq!(
            err.0,
            vec![FieldError::new("endTime", "End time must be after start time")]
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut p = payload();
        p.start_time = "10:00".to_string();
        p.end_time = "09:00".to_string();
        assert_eq!(rejected_fields(p), vec!["endTime"]);
    }

    #[test]
    fn single_digit_hour_compares_numerically() {
        let mut p = payload();
        p.start_time = "9:30".to_string();
        p.end_time = "10:00".to_string();
        assert!(validate_event(p).is_ok());
    }

    #[test]
    fn description_limit() {
        let mut p = payload();
        p.description = Some("x".repeat(500));
        assert!(validate_event(p).is_ok());

        let mut p = payload();
        p.description = Some("x".repeat(501));
        assert_eq!(rejected_fields(p), vec!["description"]);
    }

    #[test]
    fn color_must_be_hex() {
        let mut p = payload();
        p.color = "#3b82f6".to_string();
        assert!(validate_event(p).is_ok());

        let mut p = payload();
        p.color = "blue".to_string();
        assert_eq!(rejected_fields(p), vec!["color"]);
    }

    #[test]
    fn reports_every_invalid_field() {
        let p = EventPayload {
            title: String::new(),
            date: "invalid-date".to_string(),
            start_time: "25:00".to_string(),
            end_time: "08:00".to_string(),
            description: Some("x".repeat(600)),
            color: "not-a-color".to_string(),
        };

        // malformed start time means the ordering check is skipped
        assert_eq!(
            rejected_fields(p),
            vec!["title", "date", "startTime", "description", "color"]
        );
    }

    #[test]
    fn minutes_conversion() {
        assert_eq!(minutes_since_midnight("00:00"), Some(0));
        assert_eq!(minutes_since_midnight("9:05"), Some(545));
        assert_eq!(minutes_since_midnight("23:59"), Some(1439));
        assert_eq!(minutes_since_midnight("noon"), None);
    }
}

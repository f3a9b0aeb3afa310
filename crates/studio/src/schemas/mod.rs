//! Create and Update input shapes, plus the boundary checks every payload
//! passes before it is turned into an active model.
//!
//! - Create shapes carry the caller-settable fields only. Ids, timestamps and
//!   counters are assigned by the store and rejected if sent.
//! - Update shapes make every field optional. A missing field leaves the stored
//!   value alone; for nullable columns an explicit `null` clears it.
//! - JSON columns are always replaced as a whole.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;
use validator::Validate;

use crate::error::{FieldViolation, ValidationError};

pub mod ai_generation;
pub mod content_block;
pub mod course;
pub mod email_template;
pub mod layout_preset;
pub mod media_asset;

pub use ai_generation::{AiGenerationRequest, AiGenerationUpdate};
pub use content_block::{ContentBlockCreate, ContentBlockUpdate};
pub use course::{CourseCreate, CourseUpdate};
pub use email_template::{EmailTemplateCreate, EmailTemplateUpdate};
pub use layout_preset::{LayoutPresetCreate, LayoutPresetUpdate};
pub use media_asset::{MediaAssetCreate, MediaAssetUpdate};

/// JSON object as accepted for `layout_config`, `content`, `style_config` and
/// `generated_content`.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// An input payload for one entity.
pub trait InputShape: DeserializeOwned + Validate {
    /// Entity name used in error reports.
    const ENTITY: &'static str;
}

/// Run the field constraints of an already typed payload.
pub fn validate_input<T: InputShape>(input: &T) -> Result<(), ValidationError> {
    input
        .validate()
        .map_err(|errors| from_validation_errors(T::ENTITY, &errors))
}

/// Deserialize a raw JSON payload and check its field constraints.
///
/// Type mismatches, unknown or missing fields and enum values outside their
/// set are all reported as [`ValidationError`].
pub fn parse_input<T: InputShape>(value: serde_json::Value) -> Result<T, ValidationError> {
    let input: T = serde_json::from_value(value).map_err(|e| serde_violation(T::ENTITY, &e))?;
    validate_input(&input)?;
    Ok(input)
}

pub(crate) fn from_validation_errors(
    entity: &'static str,
    errors: &validator::ValidationErrors,
) -> ValidationError {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldViolation {
                field: field.clone(),
                code: e.code.to_string(),
                message: describe(e),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    ValidationError { entity, violations }
}

fn describe(err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match err.code.as_ref() {
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (_, Some(max)) => format!("must be at most {max} characters"),
            (Some(min), None) => format!("must be at least {min} characters"),
            (None, None) => "has an invalid length".to_string(),
        },
        "range" => match err.params.get("min") {
            Some(min) => format!("must be at least {min}"),
            None => "is out of range".to_string(),
        },
        other => other.to_string(),
    }
}

fn serde_violation(entity: &'static str, err: &serde_json::Error) -> ValidationError {
    let message = err.to_string();
    let (field, code) = if message.starts_with("missing field") {
        (backticked(&message), "required")
    } else if message.starts_with("unknown field") {
        (backticked(&message), "unknown_field")
    } else if message.starts_with("unknown variant") {
        (None, "enum")
    } else {
        (None, "invalid")
    };
    let field = field.unwrap_or("$").to_string();
    ValidationError::single(entity, field, code, message)
}

fn backticked(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

/// Keeps "absent" and "null" apart in update payloads:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// [`nullable`] for RFC 3339 timestamps.
pub(crate) fn nullable_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_required_field_is_named() {
        let err = parse_input::<CourseCreate>(json!({ "name": "Rust 101" })).unwrap_err();
        assert_eq!(err.entity, "course");
        assert_eq!(err.violations[0].field, "instructor");
        assert_eq!(err.violations[0].code, "required");
    }

    #[test]
    fn server_assigned_fields_are_rejected() {
        let err = parse_input::<CourseCreate>(json!({
            "id": 4,
            "name": "Rust 101",
            "instructor": "Ferris",
        }))
        .unwrap_err();
        assert_eq!(err.violations[0].field, "id");
        assert_eq!(err.violations[0].code, "unknown_field");
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 200 two-byte characters fit, 201 do not
        let ok = "é".repeat(200);
        assert!(
            parse_input::<CourseCreate>(json!({ "name": ok, "instructor": "Ferris" })).is_ok()
        );

        let too_long = "é".repeat(201);
        let err = parse_input::<CourseCreate>(json!({ "name": too_long, "instructor": "Ferris" }))
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "name");
        assert_eq!(err.violations[0].code, "length");
        assert_eq!(err.violations[0].message, "must be at most 200 characters");
    }

    #[test]
    fn every_violation_is_reported() {
        let err = parse_input::<CourseCreate>(json!({
            "name": "n".repeat(201),
            "instructor": "i".repeat(101),
            "description": "d".repeat(1001),
        }))
        .unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["description", "instructor", "name"]);
        assert!(err.to_string().starts_with("Invalid course: description:"));
    }

    #[test]
    fn enum_outside_set_is_a_validation_error() {
        let err = parse_input::<EmailTemplateUpdate>(json!({ "status": "deleted" })).unwrap_err();
        assert_eq!(err.violations[0].code, "enum");
        assert!(err.violations[0].message.contains("deleted"));
    }

    #[test]
    fn nullable_distinguishes_absent_from_null() {
        let absent = parse_input::<EmailTemplateUpdate>(json!({})).unwrap();
        assert_eq!(absent.course_id, None);

        let cleared = parse_input::<EmailTemplateUpdate>(json!({ "course_id": null })).unwrap();
        assert_eq!(cleared.course_id, Some(None));

        let set = parse_input::<EmailTemplateUpdate>(json!({ "course_id": 3 })).unwrap();
        assert_eq!(set.course_id, Some(Some(3)));
    }

    #[test]
    fn timestamps_use_rfc3339() {
        let update = parse_input::<CourseUpdate>(json!({
            "start_date": "2025-09-01T08:00:00Z",
            "end_date": null,
        }))
        .unwrap();
        let start = update.start_date.flatten().unwrap();
        assert_eq!(start.year(), 2025);
        assert_eq!(update.end_date, Some(None));

        assert!(parse_input::<CourseUpdate>(json!({ "start_date": "next monday" })).is_err());
    }

    #[test]
    fn json_columns_must_be_objects() {
        let err = parse_input::<EmailTemplateCreate>(json!({
            "name": "Welcome",
            "subject_line": "Hi",
            "layout_config": [1, 2, 3],
        }))
        .unwrap_err();
        assert_eq!(err.violations[0].code, "invalid");
    }
}

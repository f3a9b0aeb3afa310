use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use super::{InputShape, nullable};
use crate::entity::media_asset;

/// Metadata for a file the storage backend has already written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MediaAssetCreate {
    #[validate(length(max = 255))]
    pub filename: String,
    #[validate(length(max = 255))]
    pub original_filename: String,
    #[validate(length(max = 500))]
    pub file_path: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub file_size: i64,
    #[validate(length(max = 100))]
    pub mime_type: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub width: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub height: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub alt_text: String,
}

impl InputShape for MediaAssetCreate {
    const ENTITY: &'static str = "media_asset";
}

impl MediaAssetCreate {
    pub(crate) fn into_active_model(self, now: OffsetDateTime) -> media_asset::ActiveModel {
        media_asset::ActiveModel {
            filename: Set(self.filename),
            original_filename: Set(self.original_filename),
            file_path: Set(self.file_path),
            file_size: Set(self.file_size),
            mime_type: Set(self.mime_type),
            width: Set(self.width),
            height: Set(self.height),
            alt_text: Set(self.alt_text),
            usage_count: Set(0),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

/// Metadata correction. `usage_count` is only moved by recorded usage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MediaAssetUpdate {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub filename: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub original_filename: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub file_path: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub file_size: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0))]
    pub width: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0))]
    pub height: Option<Option<i32>>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub alt_text: Option<String>,
}

impl InputShape for MediaAssetUpdate {
    const ENTITY: &'static str = "media_asset";
}

impl MediaAssetUpdate {
    pub(crate) fn apply(self, active: &mut media_asset::ActiveModel) {
        if let Some(filename) = self.filename {
            active.filename = Set(filename);
        }
        if let Some(original_filename) = self.original_filename {
            active.original_filename = Set(original_filename);
        }
        if let Some(file_path) = self.file_path {
            active.file_path = Set(file_path);
        }
        if let Some(file_size) = self.file_size {
            active.file_size = Set(file_size);
        }
        if let Some(mime_type) = self.mime_type {
            active.mime_type = Set(mime_type);
        }
        if let Some(width) = self.width {
            active.width = Set(width);
        }
        if let Some(height) = self.height {
            active.height = Set(height);
        }
        if let Some(alt_text) = self.alt_text {
            active.alt_text = Set(alt_text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::parse_input;
    use serde_json::json;

    #[test]
    fn negative_sizes_are_rejected() {
        let err = parse_input::<MediaAssetCreate>(json!({
            "filename": "a.png",
            "original_filename": "A.png",
            "file_path": "/media/a.png",
            "file_size": -1,
            "mime_type": "image/png",
            "width": -5,
        }))
        .unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["file_size", "width"]);
        assert_eq!(err.violations[0].code, "range");
    }

    #[test]
    fn file_path_limit() {
        let err = parse_input::<MediaAssetCreate>(json!({
            "filename": "a.png",
            "original_filename": "A.png",
            "file_path": format!("/{}", "p".repeat(500)),
            "mime_type": "image/png",
        }))
        .unwrap_err();
        assert!(err.has_field("file_path"));
    }

    #[test]
    fn dimensions_can_be_cleared() {
        let update =
            parse_input::<MediaAssetUpdate>(json!({ "width": null, "height": 40 })).unwrap();
        assert_eq!(update.width, Some(None));
        assert_eq!(update.height, Some(Some(40)));

        let untouched = parse_input::<MediaAssetUpdate>(json!({})).unwrap();
        assert_eq!(untouched.width, None);

        let err = parse_input::<MediaAssetUpdate>(json!({ "height": -1 })).unwrap_err();
        assert!(err.has_field("height"));
    }

    #[test]
    fn usage_count_is_not_client_settable() {
        let err = parse_input::<MediaAssetUpdate>(json!({ "usage_count": 10 })).unwrap_err();
        assert_eq!(err.violations[0].code, "unknown_field");
    }
}

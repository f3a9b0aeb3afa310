use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use super::{InputShape, JsonObject, nullable};
use crate::entity::email_template;
use crate::entity::sea_orm_active_enums::{EmailStatus, TemplateType};

/// New template. Always starts as a draft.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EmailTemplateCreate {
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[serde(default)]
    pub template_type: TemplateType,
    #[validate(length(max = 200))]
    pub subject_line: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub preview_text: String,
    #[serde(default)]
    pub layout_config: JsonObject,
    #[serde(default)]
    pub course_id: Option<i32>,
}

impl InputShape for EmailTemplateCreate {
    const ENTITY: &'static str = "email_template";
}

impl EmailTemplateCreate {
    pub(crate) fn into_active_model(self, now: OffsetDateTime) -> email_template::ActiveModel {
        email_template::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            template_type: Set(self.template_type),
            status: Set(EmailStatus::Draft),
            subject_line: Set(self.subject_line),
            preview_text: Set(self.preview_text),
            layout_config: Set(self.layout_config.into()),
            course_id: Set(self.course_id),
            created_at: Set(now),
            updated_at: Set(now),
            published_at: Set(None),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EmailTemplateUpdate {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    pub template_type: Option<TemplateType>,
    #[serde(default)]
    pub status: Option<EmailStatus>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subject_line: Option<String>,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub preview_text: Option<String>,
    #[serde(default)]
    pub layout_config: Option<JsonObject>,
    #[serde(default, deserialize_with = "nullable")]
    pub course_id: Option<Option<i32>>,
}

impl InputShape for EmailTemplateUpdate {
    const ENTITY: &'static str = "email_template";
}

impl EmailTemplateUpdate {
    /// Overwrite the present fields and stamp `updated_at`.
    ///
    /// `published_at` is set on the first move to `published` and kept from
    /// then on, including after archiving.
    pub(crate) fn apply(
        self,
        current: &email_template::Model,
        active: &mut email_template::ActiveModel,
        now: OffsetDateTime,
    ) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(template_type) = self.template_type {
            active.template_type = Set(template_type);
        }
        if let Some(status) = self.status {
            if status == EmailStatus::Published && current.published_at.is_none() {
                active.published_at = Set(Some(now));
            }
            active.status = Set(status);
        }
        if let Some(subject_line) = self.subject_line {
            active.subject_line = Set(subject_line);
        }
        if let Some(preview_text) = self.preview_text {
            active.preview_text = Set(preview_text);
        }
        if let Some(layout_config) = self.layout_config {
            active.layout_config = Set(layout_config.into());
        }
        if let Some(course_id) = self.course_id {
            active.course_id = Set(course_id);
        }
        active.updated_at = Set(now);
    }
}

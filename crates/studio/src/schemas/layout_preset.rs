use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use super::{InputShape, JsonObject, nullable};
use crate::entity::layout_preset;
use crate::entity::sea_orm_active_enums::TemplateType;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LayoutPresetCreate {
    #[validate(length(max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub description: String,
    #[serde(default)]
    pub layout_config: JsonObject,
    #[serde(default)]
    pub template_type: Option<TemplateType>,
    #[serde(default)]
    pub is_default: bool,
}

impl InputShape for LayoutPresetCreate {
    const ENTITY: &'static str = "layout_preset";
}

impl LayoutPresetCreate {
    pub(crate) fn into_active_model(self, now: OffsetDateTime) -> layout_preset::ActiveModel {
        layout_preset::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            layout_config: Set(self.layout_config.into()),
            template_type: Set(self.template_type),
            is_default: Set(self.is_default),
            usage_count: Set(0),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LayoutPresetUpdate {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub description: Option<String>,
    #[serde(default)]
    pub layout_config: Option<JsonObject>,
    #[serde(default, deserialize_with = "nullable")]
    pub template_type: Option<Option<TemplateType>>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

impl InputShape for LayoutPresetUpdate {
    const ENTITY: &'static str = "layout_preset";
}

impl LayoutPresetUpdate {
    pub(crate) fn apply(self, active: &mut layout_preset::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(layout_config) = self.layout_config {
            active.layout_config = Set(layout_config.into());
        }
        if let Some(template_type) = self.template_type {
            active.template_type = Set(template_type);
        }
        if let Some(is_default) = self.is_default {
            active.is_default = Set(is_default);
        }
    }
}

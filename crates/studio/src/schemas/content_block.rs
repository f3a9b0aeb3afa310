use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use super::{InputShape, JsonObject, nullable};
use crate::entity::content_block;
use crate::entity::sea_orm_active_enums::ContentBlockType;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ContentBlockCreate {
    pub template_id: i32,
    #[serde(default)]
    pub block_type: ContentBlockType,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub content: JsonObject,
    #[serde(default)]
    pub style_config: JsonObject,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub ai_generation_id: Option<i32>,
}

impl InputShape for ContentBlockCreate {
    const ENTITY: &'static str = "content_block";
}

impl ContentBlockCreate {
    pub(crate) fn into_active_model(self, now: OffsetDateTime) -> content_block::ActiveModel {
        content_block::ActiveModel {
            template_id: Set(self.template_id),
            block_type: Set(self.block_type),
            order_index: Set(self.order_index),
            content: Set(self.content.into()),
            style_config: Set(self.style_config.into()),
            // a block linked to a generation is AI content by definition
            ai_generated: Set(self.ai_generated || self.ai_generation_id.is_some()),
            ai_generation_id: Set(self.ai_generation_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

/// Partial block update. A block cannot move to another template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ContentBlockUpdate {
    #[serde(default)]
    pub block_type: Option<ContentBlockType>,
    #[serde(default)]
    pub order_index: Option<i32>,
    #[serde(default)]
    pub content: Option<JsonObject>,
    #[serde(default)]
    pub style_config: Option<JsonObject>,
    #[serde(default)]
    pub ai_generated: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub ai_generation_id: Option<Option<i32>>,
}

impl InputShape for ContentBlockUpdate {
    const ENTITY: &'static str = "content_block";
}

impl ContentBlockUpdate {
    pub(crate) fn apply(self, active: &mut content_block::ActiveModel, now: OffsetDateTime) {
        if let Some(block_type) = self.block_type {
            active.block_type = Set(block_type);
        }
        if let Some(order_index) = self.order_index {
            active.order_index = Set(order_index);
        }
        if let Some(content) = self.content {
            active.content = Set(content.into());
        }
        if let Some(style_config) = self.style_config {
            active.style_config = Set(style_config.into());
        }
        if let Some(ai_generated) = self.ai_generated {
            active.ai_generated = Set(ai_generated);
        }
        if let Some(ai_generation_id) = self.ai_generation_id {
            if ai_generation_id.is_some() {
                active.ai_generated = Set(true);
            }
            active.ai_generation_id = Set(ai_generation_id);
        }
        active.updated_at = Set(now);
    }
}

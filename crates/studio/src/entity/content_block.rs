//! One renderable block of a template body.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::sea_orm_active_enums::ContentBlockType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub block_type: ContentBlockType,
    /// Render position within the template. Not unique; ties fall back to id.
    pub order_index: i32,
    /// Shape depends on `block_type`
    #[sea_orm(column_type = "Json")]
    pub content: Json,
    #[sea_orm(column_type = "Json")]
    pub style_config: Json,
    pub ai_generated: bool,
    /// Generation that produced this block. Always one of the same template's generations.
    pub ai_generation_id: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::email_template::Entity",
        from = "Column::TemplateId",
        to = "super::email_template::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EmailTemplate,
    #[sea_orm(
        belongs_to = "super::ai_generation::Entity",
        from = "Column::AiGenerationId",
        to = "super::ai_generation::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AiGeneration,
}

impl Related<super::email_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailTemplate.def()
    }
}

impl Related<super::ai_generation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiGeneration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

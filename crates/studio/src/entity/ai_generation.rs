//! Audit record of one call to the external AI generation service.
//!
//! Only the request parameters and the outcome are kept here; the call itself
//! happens elsewhere (see [`crate::generator::ContentGenerator`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::sea_orm_active_enums::ContentBlockType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_generations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub prompt: String,
    pub model_used: String,
    /// Two decimal places, e.g. `0.70`
    #[sea_orm(column_type = "Decimal(Some((4, 2)))")]
    pub temperature: Decimal,
    #[sea_orm(column_type = "Json")]
    pub generated_content: Json,
    pub success: bool,
    pub error_message: Option<String>,
    /// Block type to use when this generation is turned into a content block
    pub content_type: ContentBlockType,
    pub created_at: OffsetDateTime,
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
    #[sea_orm(has_many = "super::content_block::Entity")]
    ContentBlocks,
}

impl Related<super::email_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailTemplate.def()
    }
}

impl Related<super::content_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentBlocks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

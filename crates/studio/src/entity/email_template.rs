//! Email template entity. Owns its content blocks and AI generation records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::sea_orm_active_enums::{EmailStatus, TemplateType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub template_type: TemplateType,
    pub status: EmailStatus,
    pub subject_line: String,
    pub preview_text: String,
    /// Visual layout document, replaced wholesale on update
    #[sea_orm(column_type = "Json")]
    pub layout_config: Json,
    pub course_id: Option<i32>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Set the first time the template is published
    pub published_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Course,
    #[sea_orm(has_many = "super::content_block::Entity")]
    ContentBlocks,
    #[sea_orm(has_many = "super::ai_generation::Entity")]
    AiGenerations,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::content_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentBlocks.def()
    }
}

impl Related<super::ai_generation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiGenerations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_published(&self) -> bool {
        self.status == EmailStatus::Published
    }
}

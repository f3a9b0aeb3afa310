//! Content blocks and AI generation records, both owned by a template.
//!
//! Deleting a template cascades to both tables. Deleting a generation only
//! detaches the blocks it produced.

use sea_orm_migration::prelude::*;

use crate::m20250301_090000_create_course_and_template_tables::EmailTemplate;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiGeneration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiGeneration::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiGeneration::TemplateId).integer().not_null())
                    .col(ColumnDef::new(AiGeneration::Prompt).string_len(1000).not_null())
                    .col(ColumnDef::new(AiGeneration::ModelUsed).string_len(50).not_null())
                    .col(
                        ColumnDef::new(AiGeneration::Temperature)
                            .decimal_len(4, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiGeneration::GeneratedContent)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiGeneration::Success)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AiGeneration::ErrorMessage)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AiGeneration::ContentType)
                            .string_len(32)
                            .not_null()
                            .default("ai_generated"),
                    )
                    .col(
                        ColumnDef::new(AiGeneration::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_generations_template_id")
                            .from(AiGeneration::Table, AiGeneration::TemplateId)
                            .to(EmailTemplate::Table, EmailTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentBlock::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentBlock::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentBlock::TemplateId).integer().not_null())
                    .col(
                        ColumnDef::new(ContentBlock::BlockType)
                            .string_len(32)
                            .not_null()
                            .default("text"),
                    )
                    .col(
                        ColumnDef::new(ContentBlock::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ContentBlock::Content).json().not_null())
                    .col(ColumnDef::new(ContentBlock::StyleConfig).json().not_null())
                    .col(
                        ColumnDef::new(ContentBlock::AiGenerated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ContentBlock::AiGenerationId).integer().null())
                    .col(
                        ColumnDef::new(ContentBlock::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentBlock::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_blocks_template_id")
                            .from(ContentBlock::Table, ContentBlock::TemplateId)
                            .to(EmailTemplate::Table, EmailTemplate::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_blocks_ai_generation_id")
                            .from(ContentBlock::Table, ContentBlock::AiGenerationId)
                            .to(AiGeneration::Table, AiGeneration::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_blocks_template_order")
                    .table(ContentBlock::Table)
                    .col(ContentBlock::TemplateId)
                    .col(ContentBlock::OrderIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_generations_template_id")
                    .table(AiGeneration::Table)
                    .col(AiGeneration::TemplateId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ai_generations_template_id")
                    .table(AiGeneration::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_content_blocks_template_order")
                    .table(ContentBlock::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ContentBlock::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AiGeneration::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AiGeneration {
    #[iden = "ai_generations"]
    Table,
    Id,
    TemplateId,
    Prompt,
    ModelUsed,
    Temperature,
    GeneratedContent,
    Success,
    ErrorMessage,
    ContentType,
    CreatedAt,
}

#[derive(Iden)]
pub enum ContentBlock {
    #[iden = "content_blocks"]
    Table,
    Id,
    TemplateId,
    BlockType,
    OrderIndex,
    Content,
    StyleConfig,
    AiGenerated,
    AiGenerationId,
    CreatedAt,
    UpdatedAt,
}

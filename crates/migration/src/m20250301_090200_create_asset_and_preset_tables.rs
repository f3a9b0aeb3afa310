use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Standalone tables: media asset metadata and reusable layout presets.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAsset::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaAsset::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MediaAsset::Filename).string_len(255).not_null())
                    .col(
                        ColumnDef::new(MediaAsset::OriginalFilename)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MediaAsset::FilePath).string_len(500).not_null())
                    .col(
                        ColumnDef::new(MediaAsset::FileSize)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(MediaAsset::MimeType).string_len(100).not_null())
                    .col(ColumnDef::new(MediaAsset::Width).integer().null())
                    .col(ColumnDef::new(MediaAsset::Height).integer().null())
                    .col(
                        ColumnDef::new(MediaAsset::AltText)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(MediaAsset::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MediaAsset::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LayoutPreset::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LayoutPreset::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LayoutPreset::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(LayoutPreset::Description)
                            .string_len(300)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(LayoutPreset::LayoutConfig).json().not_null())
                    .col(ColumnDef::new(LayoutPreset::TemplateType).string_len(32).null())
                    .col(
                        ColumnDef::new(LayoutPreset::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LayoutPreset::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LayoutPreset::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_layout_presets_template_type")
                    .table(LayoutPreset::Table)
                    .col(LayoutPreset::TemplateType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_layout_presets_template_type")
                    .table(LayoutPreset::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(LayoutPreset::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaAsset::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum MediaAsset {
    #[iden = "media_assets"]
    Table,
    Id,
    Filename,
    OriginalFilename,
    FilePath,
    FileSize,
    MimeType,
    Width,
    Height,
    AltText,
    UsageCount,
    CreatedAt,
}

#[derive(Iden)]
pub enum LayoutPreset {
    #[iden = "layout_presets"]
    Table,
    Id,
    Name,
    Description,
    LayoutConfig,
    TemplateType,
    IsDefault,
    UsageCount,
    CreatedAt,
}

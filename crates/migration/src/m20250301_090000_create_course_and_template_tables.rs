//! Courses and the email templates that may belong to them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Course::Description)
                            .string_len(1000)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Course::Instructor).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Course::StartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Course::EndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmailTemplate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailTemplate::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmailTemplate::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(EmailTemplate::Description)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::TemplateType)
                            .string_len(32)
                            .not_null()
                            .default("course_reminder"),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::Status)
                            .string_len(32)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::SubjectLine)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::PreviewText)
                            .string_len(150)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(EmailTemplate::LayoutConfig).json().not_null())
                    .col(ColumnDef::new(EmailTemplate::CourseId).integer().null())
                    .col(
                        ColumnDef::new(EmailTemplate::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailTemplate::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_templates_course_id")
                            .from(EmailTemplate::Table, EmailTemplate::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_email_templates_course_id")
                    .table(EmailTemplate::Table)
                    .col(EmailTemplate::CourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_email_templates_course_id")
                    .table(EmailTemplate::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EmailTemplate::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Course {
    #[iden = "courses"]
    Table,
    Id,
    Name,
    Description,
    Instructor,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden)]
pub enum EmailTemplate {
    #[iden = "email_templates"]
    Table,
    Id,
    Name,
    Description,
    TemplateType,
    Status,
    SubjectLine,
    PreviewText,
    LayoutConfig,
    CourseId,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
}

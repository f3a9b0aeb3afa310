//! Email templates and the operations that touch their children.

use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QueryTrait, TransactionTrait,
};
use time::OffsetDateTime;

use super::{fetch, fetch_reference};
use crate::entity::{
    EmailStatus, TemplateType, ai_generation, content_block, course, email_template, layout_preset,
};
use crate::error::StoreResult;
use crate::schemas::{EmailTemplateCreate, EmailTemplateUpdate, validate_input};

const ENTITY: &str = "email_template";

/// Optional filters for [`TemplateService::list`]. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub course_id: Option<i32>,
    pub status: Option<EmailStatus>,
    pub template_type: Option<TemplateType>,
}

/// What a template delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDeletion {
    pub template_id: i32,
    pub content_blocks: u64,
    pub ai_generations: u64,
}

#[derive(Clone, Debug)]
pub struct TemplateService {
    db: Arc<DatabaseConnection>,
}

impl TemplateService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name, template_type = %input.template_type))]
    pub async fn create(&self, input: EmailTemplateCreate) -> StoreResult<email_template::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        if let Some(course_id) = input.course_id {
            fetch_reference::<course::Entity, _>(&txn, ENTITY, "course_id", course_id).await?;
        }
        let template = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!(template_id = template.id, "Created email template");
        Ok(template)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<email_template::Model> {
        fetch::<email_template::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: TemplateFilter) -> StoreResult<Vec<email_template::Model>> {
        Ok(email_template::Entity::find()
            .apply_if(filter.course_id, |q, v| {
                q.filter(email_template::Column::CourseId.eq(v))
            })
            .apply_if(filter.status, |q, v| {
                q.filter(email_template::Column::Status.eq(v))
            })
            .apply_if(filter.template_type, |q, v| {
                q.filter(email_template::Column::TemplateType.eq(v))
            })
            .order_by_asc(email_template::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: EmailTemplateUpdate,
    ) -> StoreResult<email_template::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<email_template::Entity, _>(&txn, ENTITY, id).await?;
        if let Some(Some(course_id)) = input.course_id {
            fetch_reference::<course::Entity, _>(&txn, ENTITY, "course_id", course_id).await?;
        }
        let mut active: email_template::ActiveModel = current.clone().into();
        input.apply(&current, &mut active, OffsetDateTime::now_utc());
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        if updated.status != current.status {
            tracing::info!(
                template_id = id,
                from = %current.status,
                to = %updated.status,
                "Template status changed"
            );
        }
        Ok(updated)
    }

    /// Delete a template with all of its content blocks and AI generations.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<TemplateDeletion> {
        let txn = self.db.begin().await?;
        fetch::<email_template::Entity, _>(&txn, ENTITY, id).await?;

        // blocks first: they may point at the generations
        let blocks = content_block::Entity::delete_many()
            .filter(content_block::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        let generations = ai_generation::Entity::delete_many()
            .filter(ai_generation::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        email_template::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        let deletion = TemplateDeletion {
            template_id: id,
            content_blocks: blocks.rows_affected,
            ai_generations: generations.rows_affected,
        };
        tracing::info!(
            template_id = id,
            content_blocks = deletion.content_blocks,
            ai_generations = deletion.ai_generations,
            "Deleted email template"
        );
        Ok(deletion)
    }

    /// Copy a preset's layout onto a template and count the use of the preset.
    #[tracing::instrument(skip(self))]
    pub async fn apply_preset(
        &self,
        template_id: i32,
        preset_id: i32,
    ) -> StoreResult<email_template::Model> {
        let txn = self.db.begin().await?;
        let template = fetch::<email_template::Entity, _>(&txn, ENTITY, template_id).await?;
        let preset =
            fetch::<layout_preset::Entity, _>(&txn, "layout_preset", preset_id).await?;

        let mut active: email_template::ActiveModel = template.into();
        active.layout_config = Set(preset.layout_config);
        active.updated_at = Set(OffsetDateTime::now_utc());
        let updated = active.update(&txn).await?;

        layout_preset::Entity::update_many()
            .col_expr(
                layout_preset::Column::UsageCount,
                Expr::col(layout_preset::Column::UsageCount).add(1),
            )
            .filter(layout_preset::Column::Id.eq(preset_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!(template_id, preset_id, "Applied layout preset");
        Ok(updated)
    }
}

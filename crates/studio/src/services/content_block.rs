use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use time::OffsetDateTime;

use super::{fetch, fetch_reference};
use crate::entity::{ai_generation, content_block, email_template};
use crate::error::{IntegrityError, StoreError, StoreResult};
use crate::schemas::{ContentBlockCreate, ContentBlockUpdate, validate_input};

const ENTITY: &str = "content_block";

/// A block may only point at a successful generation made for its own template.
pub(crate) async fn check_generation<C: ConnectionTrait>(
    conn: &C,
    template_id: i32,
    generation_id: i32,
) -> StoreResult<ai_generation::Model> {
    let generation = fetch_reference::<ai_generation::Entity, _>(
        conn,
        ENTITY,
        "ai_generation_id",
        generation_id,
    )
    .await?;
    if generation.template_id != template_id {
        tracing::warn!(
            generation_id,
            template_id,
            generation_template_id = generation.template_id,
            "Rejected generation from another template"
        );
        return Err(IntegrityError::CrossTemplateReference {
            generation_id,
            expected_template: template_id,
            actual_template: generation.template_id,
        }
        .into());
    }
    if !generation.success {
        tracing::warn!(generation_id, "Rejected link to failed generation");
        return Err(IntegrityError::FailedGeneration(generation_id).into());
    }
    Ok(generation)
}

#[derive(Clone, Debug)]
pub struct ContentBlockService {
    db: Arc<DatabaseConnection>,
}

impl ContentBlockService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self, input), fields(template_id = input.template_id, block_type = %input.block_type))]
    pub async fn create(&self, input: ContentBlockCreate) -> StoreResult<content_block::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        fetch_reference::<email_template::Entity, _>(
            &txn,
            ENTITY,
            "template_id",
            input.template_id,
        )
        .await?;
        if let Some(generation_id) = input.ai_generation_id {
            check_generation(&txn, input.template_id, generation_id).await?;
        }
        let block = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!(block_id = block.id, "Created content block");
        Ok(block)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<content_block::Model> {
        fetch::<content_block::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    /// Blocks in render order: `order_index`, then insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_template(
        &self,
        template_id: i32,
    ) -> StoreResult<Vec<content_block::Model>> {
        fetch::<email_template::Entity, _>(self.db.as_ref(), "email_template", template_id).await?;
        Ok(content_block::Entity::find()
            .filter(content_block::Column::TemplateId.eq(template_id))
            .order_by_asc(content_block::Column::OrderIndex)
            .order_by_asc(content_block::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: ContentBlockUpdate,
    ) -> StoreResult<content_block::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<content_block::Entity, _>(&txn, ENTITY, id).await?;
        if let Some(Some(generation_id)) = input.ai_generation_id {
            check_generation(&txn, current.template_id, generation_id).await?;
        }
        let mut active: content_block::ActiveModel = current.into();
        input.apply(&mut active, OffsetDateTime::now_utc());
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = content_block::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        tracing::info!(block_id = id, "Deleted content block");
        Ok(())
    }
}

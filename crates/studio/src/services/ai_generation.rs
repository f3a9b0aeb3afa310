//! Recording calls to the AI generation service and turning their output
//! into content blocks.

use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use time::OffsetDateTime;

use super::{fetch, fetch_reference};
use crate::entity::{ai_generation, content_block, email_template};
use crate::error::{IntegrityError, StoreResult};
use crate::generator::{ContentGenerator, GenerationParams};
use crate::schemas::ai_generation::{GenerationOutcome, truncate_error_message};
use crate::schemas::{
    AiGenerationRequest, AiGenerationUpdate, ContentBlockCreate, JsonObject, validate_input,
};

const ENTITY: &str = "ai_generation";

#[derive(Clone, Debug)]
pub struct AiGenerationService {
    db: Arc<DatabaseConnection>,
}

impl AiGenerationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Persist the parameters and outcome of a generation call made elsewhere.
    #[tracing::instrument(skip(self, request, outcome), fields(template_id = request.template_id, model = %request.model_used))]
    pub async fn record(
        &self,
        request: AiGenerationRequest,
        outcome: GenerationOutcome,
    ) -> StoreResult<ai_generation::Model> {
        validate_input(&request)?;
        let outcome = match outcome {
            GenerationOutcome::Failed(message) => {
                GenerationOutcome::Failed(truncate_error_message(&message))
            }
            generated => generated,
        };
        let txn = self.db.begin().await?;
        fetch_reference::<email_template::Entity, _>(
            &txn,
            ENTITY,
            "template_id",
            request.template_id,
        )
        .await?;
        let generation = request
            .into_active_model(outcome, OffsetDateTime::now_utc())
            .insert(&txn)
            .await?;
        txn.commit().await?;

        if generation.success {
            tracing::info!(generation_id = generation.id, "Recorded AI generation");
        } else {
            tracing::warn!(
                generation_id = generation.id,
                error = generation.error_message.as_deref().unwrap_or_default(),
                "Recorded failed AI generation"
            );
        }
        Ok(generation)
    }

    /// Call the generation service and record whatever it returns.
    ///
    /// Input and the template are checked before the external call so that an
    /// invalid request never reaches the service.
    #[tracing::instrument(skip(self, request, generator), fields(template_id = request.template_id))]
    pub async fn generate(
        &self,
        request: AiGenerationRequest,
        generator: &dyn ContentGenerator,
    ) -> StoreResult<ai_generation::Model> {
        validate_input(&request)?;
        fetch_reference::<email_template::Entity, _>(
            self.db.as_ref(),
            ENTITY,
            "template_id",
            request.template_id,
        )
        .await?;

        let outcome = match generator
            .generate(GenerationParams {
                prompt: &request.prompt,
                model_used: &request.model_used,
                temperature: request.temperature,
            })
            .await
        {
            Ok(content) => GenerationOutcome::Generated(content),
            Err(failure) => GenerationOutcome::Failed(failure.to_string()),
        };
        self.record(request, outcome).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<ai_generation::Model> {
        fetch::<ai_generation::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    /// Generations of a template, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_template(
        &self,
        template_id: i32,
    ) -> StoreResult<Vec<ai_generation::Model>> {
        fetch::<email_template::Entity, _>(self.db.as_ref(), "email_template", template_id).await?;
        Ok(ai_generation::Entity::find()
            .filter(ai_generation::Column::TemplateId.eq(template_id))
            .order_by_asc(ai_generation::Column::CreatedAt)
            .order_by_asc(ai_generation::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: AiGenerationUpdate,
    ) -> StoreResult<ai_generation::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<ai_generation::Entity, _>(&txn, ENTITY, id).await?;
        let mut active: ai_generation::ActiveModel = current.into();
        input.apply(&mut active);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Delete a generation. Blocks it produced stay, unlinked.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        fetch::<ai_generation::Entity, _>(&txn, ENTITY, id).await?;
        let unlinked = content_block::Entity::update_many()
            .col_expr(
                content_block::Column::AiGenerationId,
                Expr::value(Option::<i32>::None),
            )
            .filter(content_block::Column::AiGenerationId.eq(id))
            .exec(&txn)
            .await?;
        ai_generation::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        tracing::info!(
            generation_id = id,
            unlinked_blocks = unlinked.rows_affected,
            "Deleted AI generation"
        );
        Ok(())
    }

    /// Materialise a successful generation as a block of its template.
    #[tracing::instrument(skip(self))]
    pub async fn create_block(
        &self,
        generation_id: i32,
        order_index: i32,
    ) -> StoreResult<content_block::Model> {
        let txn = self.db.begin().await?;
        let generation = fetch::<ai_generation::Entity, _>(&txn, ENTITY, generation_id).await?;
        if !generation.success {
            return Err(IntegrityError::FailedGeneration(generation_id).into());
        }
        let content = match generation.generated_content {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = JsonObject::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        let input = ContentBlockCreate {
            template_id: generation.template_id,
            block_type: generation.content_type,
            order_index,
            content,
            style_config: JsonObject::new(),
            ai_generated: true,
            ai_generation_id: Some(generation.id),
        };
        let block = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(&txn)
            .await?;
        txn.commit().await?;
        tracing::info!(block_id = block.id, generation_id, "Created block from AI generation");
        Ok(block)
    }
}

use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QueryTrait, TransactionTrait,
};
use time::OffsetDateTime;

use super::fetch;
use crate::entity::{TemplateType, layout_preset};
use crate::error::{StoreError, StoreResult};
use crate::schemas::{LayoutPresetCreate, LayoutPresetUpdate, validate_input};

const ENTITY: &str = "layout_preset";

/// At most one default per template type: clear the flag on the others.
async fn clear_other_defaults<C: ConnectionTrait>(
    conn: &C,
    keep_id: i32,
    template_type: Option<TemplateType>,
) -> StoreResult<()> {
    let same_type = match template_type {
        Some(t) => layout_preset::Column::TemplateType.eq(t),
        None => layout_preset::Column::TemplateType.is_null(),
    };
    layout_preset::Entity::update_many()
        .col_expr(layout_preset::Column::IsDefault, Expr::value(false))
        .filter(same_type)
        .filter(layout_preset::Column::IsDefault.eq(true))
        .filter(layout_preset::Column::Id.ne(keep_id))
        .exec(conn)
        .await?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct LayoutPresetService {
    db: Arc<DatabaseConnection>,
}

impl LayoutPresetService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: LayoutPresetCreate) -> StoreResult<layout_preset::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let preset = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(&txn)
            .await?;
        if preset.is_default {
            clear_other_defaults(&txn, preset.id, preset.template_type).await?;
        }
        txn.commit().await?;
        tracing::info!(
            preset_id = preset.id,
            is_default = preset.is_default,
            "Created layout preset"
        );
        Ok(preset)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<layout_preset::Model> {
        fetch::<layout_preset::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    /// All presets, or those tagged with `template_type`.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        template_type: Option<TemplateType>,
    ) -> StoreResult<Vec<layout_preset::Model>> {
        Ok(layout_preset::Entity::find()
            .apply_if(template_type, |q, t| {
                q.filter(layout_preset::Column::TemplateType.eq(t))
            })
            .order_by_asc(layout_preset::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    /// Default preset for a template type, falling back to an untyped default.
    #[tracing::instrument(skip(self))]
    pub async fn default_for(
        &self,
        template_type: TemplateType,
    ) -> StoreResult<Option<layout_preset::Model>> {
        let candidates = layout_preset::Entity::find()
            .filter(layout_preset::Column::IsDefault.eq(true))
            .filter(
                Condition::any()
                    .add(layout_preset::Column::TemplateType.eq(template_type))
                    .add(layout_preset::Column::TemplateType.is_null()),
            )
            .order_by_asc(layout_preset::Column::Id)
            .all(self.db.as_ref())
            .await?;
        let typed = candidates
            .iter()
            .position(|p| p.template_type == Some(template_type));
        Ok(match typed {
            Some(i) => candidates.into_iter().nth(i),
            None => candidates.into_iter().next(),
        })
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: LayoutPresetUpdate,
    ) -> StoreResult<layout_preset::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<layout_preset::Entity, _>(&txn, ENTITY, id).await?;
        let mut active: layout_preset::ActiveModel = current.into();
        input.apply(&mut active);
        let updated = active.update(&txn).await?;
        if updated.is_default {
            clear_other_defaults(&txn, updated.id, updated.template_type).await?;
        }
        txn.commit().await?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = layout_preset::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        tracing::info!(preset_id = id, "Deleted layout preset");
        Ok(())
    }

    /// Count one more use of the preset.
    ///
    /// [`crate::services::TemplateService::apply_preset`] counts its own uses.
    #[tracing::instrument(skip(self))]
    pub async fn record_usage(&self, id: i32) -> StoreResult<layout_preset::Model> {
        let txn = self.db.begin().await?;
        let res = layout_preset::Entity::update_many()
            .col_expr(
                layout_preset::Column::UsageCount,
                Expr::col(layout_preset::Column::UsageCount).add(1),
            )
            .filter(layout_preset::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        let preset = fetch::<layout_preset::Entity, _>(&txn, ENTITY, id).await?;
        txn.commit().await?;
        Ok(preset)
    }
}

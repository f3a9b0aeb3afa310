use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use time::OffsetDateTime;

use super::fetch;
use crate::entity::media_asset;
use crate::error::{StoreError, StoreResult};
use crate::schemas::{MediaAssetCreate, MediaAssetUpdate, validate_input};

const ENTITY: &str = "media_asset";

#[derive(Clone, Debug)]
pub struct MediaAssetService {
    db: Arc<DatabaseConnection>,
}

impl MediaAssetService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self, input), fields(filename = %input.filename, mime_type = %input.mime_type))]
    pub async fn create(&self, input: MediaAssetCreate) -> StoreResult<media_asset::Model> {
        validate_input(&input)?;
        let asset = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(self.db.as_ref())
            .await?;
        tracing::info!(asset_id = asset.id, file_size = asset.file_size, "Registered media asset");
        Ok(asset)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<media_asset::Model> {
        fetch::<media_asset::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<media_asset::Model>> {
        Ok(media_asset::Entity::find()
            .order_by_asc(media_asset::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: MediaAssetUpdate,
    ) -> StoreResult<media_asset::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<media_asset::Entity, _>(&txn, ENTITY, id).await?;
        let mut active: media_asset::ActiveModel = current.into();
        input.apply(&mut active);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Only the metadata row goes; the stored file is the storage backend's concern.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let res = media_asset::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        tracing::info!(asset_id = id, "Deleted media asset");
        Ok(())
    }

    /// Count one more use of the asset.
    #[tracing::instrument(skip(self))]
    pub async fn record_usage(&self, id: i32) -> StoreResult<media_asset::Model> {
        let txn = self.db.begin().await?;
        let res = media_asset::Entity::update_many()
            .col_expr(
                media_asset::Column::UsageCount,
                Expr::col(media_asset::Column::UsageCount).add(1),
            )
            .filter(media_asset::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }
        let asset = fetch::<media_asset::Entity, _>(&txn, ENTITY, id).await?;
        txn.commit().await?;
        Ok(asset)
    }
}

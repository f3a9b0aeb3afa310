//! Persistence services, one per entity.
//!
//! Each service validates its input first, then does all reads and writes of
//! one operation inside a single transaction.

use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

use crate::error::{IntegrityError, StoreError, StoreResult};

pub mod ai_generation;
pub mod content_block;
pub mod course;
pub mod layout_preset;
pub mod media_asset;
pub mod template;

pub use ai_generation::AiGenerationService;
pub use content_block::ContentBlockService;
pub use course::CourseService;
pub use layout_preset::LayoutPresetService;
pub use media_asset::MediaAssetService;
pub use template::{TemplateDeletion, TemplateFilter, TemplateService};

/// Load a record or fail with `NotFound`.
pub(crate) async fn fetch<E, C>(conn: &C, entity: &'static str, id: i32) -> StoreResult<E::Model>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::not_found(entity, id))
}

/// Load the record a foreign key points at, or fail with an integrity error
/// naming the referencing field.
pub(crate) async fn fetch_reference<E, C>(
    conn: &C,
    entity: &'static str,
    field: &'static str,
    id: i32,
) -> StoreResult<E::Model>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    match E::find_by_id(id).one(conn).await? {
        Some(model) => Ok(model),
        None => {
            tracing::warn!(entity, field, id, "Rejected reference to missing record");
            Err(IntegrityError::MissingReference { entity, field, id }.into())
        }
    }
}

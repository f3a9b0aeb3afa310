use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use time::OffsetDateTime;

use super::fetch;
use crate::entity::{course, email_template};
use crate::error::StoreResult;
use crate::schemas::{CourseCreate, CourseUpdate, validate_input};

const ENTITY: &str = "course";

#[derive(Clone, Debug)]
pub struct CourseService {
    db: Arc<DatabaseConnection>,
}

impl CourseService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CourseCreate) -> StoreResult<course::Model> {
        validate_input(&input)?;
        let course = input
            .into_active_model(OffsetDateTime::now_utc())
            .insert(self.db.as_ref())
            .await?;
        tracing::info!(course_id = course.id, "Created course");
        Ok(course)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> StoreResult<course::Model> {
        fetch::<course::Entity, _>(self.db.as_ref(), ENTITY, id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<course::Model>> {
        Ok(course::Entity::find()
            .order_by_asc(course::Column::Name)
            .order_by_asc(course::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: CourseUpdate) -> StoreResult<course::Model> {
        validate_input(&input)?;
        let txn = self.db.begin().await?;
        let current = fetch::<course::Entity, _>(&txn, ENTITY, id).await?;
        let mut active: course::ActiveModel = current.into();
        input.apply(&mut active);
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Templates of the course are kept and detached.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let course = fetch::<course::Entity, _>(&txn, ENTITY, id).await?;
        let detached = email_template::Entity::update_many()
            .col_expr(email_template::Column::CourseId, Expr::value(Option::<i32>::None))
            .filter(email_template::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        course.delete(&txn).await?;
        txn.commit().await?;
        tracing::info!(
            course_id = id,
            detached_templates = detached.rows_affected,
            "Deleted course"
        );
        Ok(())
    }

    /// Templates written for a course.
    #[tracing::instrument(skip(self))]
    pub async fn templates(&self, id: i32) -> StoreResult<Vec<email_template::Model>> {
        let course = self.get(id).await?;
        Ok(course
            .find_related(email_template::Entity)
            .order_by_asc(email_template::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }
}

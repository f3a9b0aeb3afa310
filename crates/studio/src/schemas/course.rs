use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use super::{InputShape, nullable_timestamp};
use crate::entity::course;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CourseCreate {
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(length(max = 100))]
    pub instructor: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
}

impl InputShape for CourseCreate {
    const ENTITY: &'static str = "course";
}

impl CourseCreate {
    pub(crate) fn into_active_model(self, now: OffsetDateTime) -> course::ActiveModel {
        course::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            instructor: Set(self.instructor),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CourseUpdate {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub instructor: Option<String>,
    #[serde(default, deserialize_with = "nullable_timestamp")]
    pub start_date: Option<Option<OffsetDateTime>>,
    #[serde(default, deserialize_with = "nullable_timestamp")]
    pub end_date: Option<Option<OffsetDateTime>>,
}

impl InputShape for CourseUpdate {
    const ENTITY: &'static str = "course";
}

impl CourseUpdate {
    pub(crate) fn apply(self, active: &mut course::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(instructor) = self.instructor {
            active.instructor = Set(instructor);
        }
        if let Some(start_date) = self.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = self.end_date {
            active.end_date = Set(end_date);
        }
    }
}

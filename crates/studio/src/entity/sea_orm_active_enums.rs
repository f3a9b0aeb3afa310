//! Closed value sets shared by several tables.
//!
//! Every enum is stored as its snake_case string value and parses back from
//! exactly that string; anything else is a validation failure.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a template is sent for.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    #[default]
    #[sea_orm(string_value = "course_reminder")]
    CourseReminder,
    #[sea_orm(string_value = "course_starts_today")]
    CourseStartsToday,
    #[sea_orm(string_value = "course_welcome")]
    CourseWelcome,
    #[sea_orm(string_value = "course_completion")]
    CourseCompletion,
    #[sea_orm(string_value = "assignment_due")]
    AssignmentDue,
    #[sea_orm(string_value = "grade_notification")]
    GradeNotification,
}

/// Publication state of a template.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Kind of a block inside a template body. Determines the shape of its `content`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ContentBlockType {
    #[default]
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "button")]
    Button,
    #[sea_orm(string_value = "divider")]
    Divider,
    #[sea_orm(string_value = "spacer")]
    Spacer,
    #[sea_orm(string_value = "ai_generated")]
    AiGenerated,
}

fn parse_variant<E>(field: &'static str, raw: &str) -> Result<E, ValidationError>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&raw.to_owned()).map_err(|_| {
        ValidationError::single(
            "enum",
            field,
            "enum",
            format!(
                "unknown value `{raw}`, expected one of: {}",
                E::values().join(", ")
            ),
        )
    })
}

macro_rules! string_enum_impls {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_variant($field, s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_value())
            }
        }
    };
}

string_enum_impls!(TemplateType, "template_type");
string_enum_impls!(EmailStatus, "status");
string_enum_impls!(ContentBlockType, "block_type");

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn parses_every_declared_value() {
        for variant in TemplateType::iter() {
            let parsed: TemplateType = variant.to_string().parse().unwrap();
            assert_eq!(parsed, variant);
        }
        assert_eq!(
            "ai_generated".parse::<ContentBlockType>().unwrap(),
            ContentBlockType::AiGenerated
        );
        assert_eq!("archived".parse::<EmailStatus>().unwrap(), EmailStatus::Archived);
    }

    #[test]
    fn rejects_values_outside_the_set() {
        let err = "weekly_digest".parse::<TemplateType>().unwrap_err();
        assert_eq!(err.violations[0].field, "template_type");
        assert!(err.violations[0].message.contains("course_welcome"));

        assert!("Draft".parse::<EmailStatus>().is_err());
        assert!("video".parse::<ContentBlockType>().is_err());
    }

    #[test]
    fn serde_uses_stored_strings() {
        let json = serde_json::to_string(&TemplateType::GradeNotification).unwrap();
        assert_eq!(json, "\"grade_notification\"");
        let status: EmailStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(status, EmailStatus::Published);
        assert!(serde_json::from_str::<EmailStatus>("\"deleted\"").is_err());
    }

    #[test]
    fn defaults_match_column_defaults() {
        assert_eq!(TemplateType::default(), TemplateType::CourseReminder);
        assert_eq!(EmailStatus::default(), EmailStatus::Draft);
        assert_eq!(ContentBlockType::default(), ContentBlockType::Text);
    }
}

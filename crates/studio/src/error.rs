use std::fmt;

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    /// Machine readable reason, e.g. `length`, `range`, `enum`, `unknown_field`.
    pub code: String,
    pub message: String,
}

/// Client input error: the payload broke a field constraint.
///
/// Raised before anything touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(
        entity: &'static str,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            violations: vec![FieldViolation {
                field: field.into(),
                code: code.into(),
                message: message.into(),
            }],
        }
    }

    /// Whether any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}:", self.entity)?;
        for (i, v) in self.violations.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            write!(f, "{sep}{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// Referential error: a relationship between records would be broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("{entity}.{field} references missing record {id}")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        id: i32,
    },
    #[error(
        "AI generation {generation_id} belongs to template {actual_template}, not {expected_template}"
    )]
    CrossTemplateReference {
        generation_id: i32,
        expected_template: i32,
        actual_template: i32,
    },
    #[error("AI generation {0} did not succeed and cannot produce a content block")]
    FailedGeneration(i32),
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, StoreError::Integrity(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(SqlErr::UniqueConstraintViolation(msg)) => {
                StoreError::Integrity(IntegrityError::Constraint(msg))
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

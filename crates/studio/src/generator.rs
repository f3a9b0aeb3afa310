//! Seam for the external AI generation service.
//!
//! The store never talks to a model provider itself. Callers hand an
//! implementation of [`ContentGenerator`] to
//! [`AiGenerationService::generate`](crate::services::AiGenerationService::generate),
//! which records the request and whatever came back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::schemas::JsonObject;

/// Parameters passed to the generation service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams<'a> {
    pub prompt: &'a str,
    pub model_used: &'a str,
    pub temperature: Decimal,
}

/// The service answered with an error or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GenerationFailure(pub String);

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        params: GenerationParams<'_>,
    ) -> Result<JsonObject, GenerationFailure>;
}

use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use time::OffsetDateTime;
use validator::{Validate, ValidationErrors};

use super::{InputShape, JsonObject, nullable};
use crate::entity::ai_generation;
use crate::entity::sea_orm_active_enums::ContentBlockType;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// 0.7
pub const DEFAULT_TEMPERATURE: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> Decimal {
    DEFAULT_TEMPERATURE
}

pub const MAX_TEMPERATURE: Decimal = Decimal::TWO;

/// Stored as `NUMERIC(4, 2)`: anything finer or larger would be rounded or overflow.
fn validate_temperature(temperature: &Decimal) -> Result<(), validator::ValidationError> {
    if temperature.is_sign_negative() || *temperature > MAX_TEMPERATURE {
        let mut err = validator::ValidationError::new("range");
        err.message = Some(format!("must be between 0 and {MAX_TEMPERATURE}").into());
        return Err(err);
    }
    if temperature.normalize().scale() > 2 {
        let mut err = validator::ValidationError::new("scale");
        err.message = Some("must have at most 2 decimal places".into());
        return Err(err);
    }
    Ok(())
}

fn default_content_type() -> ContentBlockType {
    ContentBlockType::AiGenerated
}

/// Parameters of a call to the AI generation service for one template.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AiGenerationRequest {
    pub template_id: i32,
    #[validate(length(max = 1000))]
    pub prompt: String,
    #[serde(default = "default_model")]
    #[validate(length(max = 50))]
    pub model_used: String,
    #[serde(default = "default_temperature")]
    #[validate(custom(function = "validate_temperature"))]
    pub temperature: Decimal,
    /// Block type given to blocks created from this generation
    #[serde(default = "default_content_type")]
    pub content_type: ContentBlockType,
}

impl Default for AiGenerationRequest {
    fn default() -> Self {
        Self {
            template_id: 0,
            prompt: String::new(),
            model_used: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            content_type: default_content_type(),
        }
    }
}

impl InputShape for AiGenerationRequest {
    const ENTITY: &'static str = "ai_generation";
}

/// Result of the external call, as recorded next to the request.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated(JsonObject),
    Failed(String),
}

impl AiGenerationRequest {
    pub(crate) fn into_active_model(
        self,
        outcome: GenerationOutcome,
        now: OffsetDateTime,
    ) -> ai_generation::ActiveModel {
        let (generated_content, success, error_message) = match outcome {
            GenerationOutcome::Generated(content) => (content, true, None),
            GenerationOutcome::Failed(message) => (JsonObject::new(), false, Some(message)),
        };
        ai_generation::ActiveModel {
            template_id: Set(self.template_id),
            prompt: Set(self.prompt),
            model_used: Set(self.model_used),
            temperature: Set(self.temperature),
            generated_content: Set(generated_content.into()),
            success: Set(success),
            error_message: Set(error_message),
            content_type: Set(self.content_type),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

const ERROR_MESSAGE_MAX: usize = 500;

/// Longest error message kept on a failed generation.
pub(crate) fn truncate_error_message(message: &str) -> String {
    message.chars().take(ERROR_MESSAGE_MAX).collect()
}

/// Correction of a recorded outcome. Request parameters are immutable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiGenerationUpdate {
    #[serde(default)]
    pub generated_content: Option<JsonObject>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub error_message: Option<Option<String>>,
}

impl Validate for AiGenerationUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(Some(message)) = &self.error_message {
            if message.chars().count() > ERROR_MESSAGE_MAX {
                let mut err = validator::ValidationError::new("length");
                err.add_param("max".into(), &ERROR_MESSAGE_MAX);
                errors.add("error_message", err);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl InputShape for AiGenerationUpdate {
    const ENTITY: &'static str = "ai_generation";
}

impl AiGenerationUpdate {
    pub(crate) fn apply(self, active: &mut ai_generation::ActiveModel) {
        if let Some(content) = self.generated_content {
            active.generated_content = Set(content.into());
        }
        if let Some(success) = self.success {
            active.success = Set(success);
        }
        if let Some(error_message) = self.error_message {
            active.error_message = Set(error_message);
        }
    }
}

//! sea-orm entities, one module per table.

pub mod ai_generation;
pub mod content_block;
pub mod course;
pub mod email_template;
pub mod layout_preset;
pub mod media_asset;
pub mod sea_orm_active_enums;

pub use sea_orm_active_enums::{ContentBlockType, EmailStatus, TemplateType};

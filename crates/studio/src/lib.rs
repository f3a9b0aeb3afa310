//! Persistence and validation layer for an email template authoring tool.
//!
//! Courses, email templates, their content blocks and AI generation records,
//! media asset metadata and layout presets, stored through sea-orm. Every
//! write goes through a Create or Update shape from [`schemas`] and is checked
//! before it reaches the database.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod generator;
pub mod schemas;
pub mod services;

use crate::entity::{
    ai_generation, content_block, course, email_template, layout_preset, media_asset,
};
use crate::services::{
    AiGenerationService, ContentBlockService, CourseService, LayoutPresetService,
    MediaAssetService, TemplateService,
};

/// All services over one shared connection pool.
#[derive(Clone, Debug)]
pub struct Studio {
    pub db: Arc<DatabaseConnection>,
    pub courses: CourseService,
    pub templates: TemplateService,
    pub blocks: ContentBlockService,
    pub generations: AiGenerationService,
    pub assets: MediaAssetService,
    pub presets: LayoutPresetService,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub courses: u64,
    pub email_templates: u64,
    pub content_blocks: u64,
    pub ai_generations: u64,
    pub media_assets: u64,
    pub layout_presets: u64,
}

impl Studio {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            courses: CourseService::new(db.clone()),
            templates: TemplateService::new(db.clone()),
            blocks: ContentBlockService::new(db.clone()),
            generations: AiGenerationService::new(db.clone()),
            assets: MediaAssetService::new(db.clone()),
            presets: LayoutPresetService::new(db.clone()),
            db,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn summary(&self) -> Result<StoreSummary, DbErr> {
        let db = self.db.as_ref();
        Ok(StoreSummary {
            courses: course::Entity::find().count(db).await?,
            email_templates: email_template::Entity::find().count(db).await?,
            content_blocks: content_block::Entity::find().count(db).await?,
            ai_generations: ai_generation::Entity::find().count(db).await?,
            media_assets: media_asset::Entity::find().count(db).await?,
            layout_presets: layout_preset::Entity::find().count(db).await?,
        })
    }
}

#![allow(dead_code)]

use email_template_studio::Studio;
use email_template_studio::database::migrate;
use email_template_studio::entity::{course, email_template};
use email_template_studio::schemas::{CourseCreate, EmailTemplateCreate};
use sea_orm::Database;
use std::sync::Arc;

/// Create an in-memory SQLite database with the full schema applied.
pub async fn setup_studio() -> Studio {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    migrate(&db).await.expect("Failed to run migrations");
    Studio::new(Arc::new(db))
}

pub async fn create_test_course(studio: &Studio, name: &str) -> course::Model {
    studio
        .courses
        .create(CourseCreate {
            name: name.to_string(),
            instructor: "Ferris Crab".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create test course")
}

pub async fn create_test_template(studio: &Studio, name: &str) -> email_template::Model {
    studio
        .templates
        .create(EmailTemplateCreate {
            name: name.to_string(),
            subject_line: format!("{name} subject"),
            ..Default::default()
        })
        .await
        .expect("Failed to create test template")
}

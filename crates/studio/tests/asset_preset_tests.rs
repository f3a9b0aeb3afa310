//! Media asset metadata and layout presets: the two standalone tables.

mod common;

use common::{create_test_template, setup_studio};
use email_template_studio::entity::TemplateType;
use email_template_studio::error::StoreError;
use email_template_studio::schemas::{
    LayoutPresetCreate, LayoutPresetUpdate, MediaAssetCreate, MediaAssetUpdate, parse_input,
};
use serde_json::json;

fn banner() -> MediaAssetCreate {
    MediaAssetCreate {
        filename: "3f2a-banner.png".to_string(),
        original_filename: "banner.png".to_string(),
        file_path: "/media/2025/3f2a-banner.png".to_string(),
        file_size: 48_213,
        mime_type: "image/png".to_string(),
        width: Some(600),
        height: Some(200),
        alt_text: "Course banner".to_string(),
    }
}

fn preset(name: &str, template_type: Option<TemplateType>, is_default: bool) -> LayoutPresetCreate {
    LayoutPresetCreate {
        name: name.to_string(),
        layout_config: json!({ "preset": name }).as_object().cloned().unwrap(),
        template_type,
        is_default,
        ..Default::default()
    }
}

// =============================================================================
// Media assets
// =============================================================================

#[tokio::test]
async fn test_asset_round_trip() {
    let studio = setup_studio().await;

    let asset = studio.assets.create(banner()).await.unwrap();
    assert_eq!(asset.usage_count, 0);
    assert_eq!(asset.file_size, 48_213);
    assert!(asset.is_image());
    assert_eq!(studio.assets.get(asset.id).await.unwrap(), asset);

    let pdf = studio
        .assets
        .create(MediaAssetCreate {
            filename: "syllabus.pdf".to_string(),
            original_filename: "Syllabus.pdf".to_string(),
            file_path: "/media/syllabus.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!pdf.is_image());
    assert_eq!(pdf.width, None);
    assert_eq!(studio.assets.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_asset_usage_and_update() {
    let studio = setup_studio().await;
    let asset = studio.assets.create(banner()).await.unwrap();

    studio.assets.record_usage(asset.id).await.unwrap();
    let used = studio.assets.record_usage(asset.id).await.unwrap();
    assert_eq!(used.usage_count, 2);

    let update: MediaAssetUpdate = parse_input(json!({ "alt_text": "Spring banner" })).unwrap();
    let updated = studio.assets.update(asset.id, update).await.unwrap();
    assert_eq!(updated.alt_text, "Spring banner");
    assert_eq!(updated.usage_count, 2);
    assert_eq!(updated.width, Some(600));

    assert!(parse_input::<MediaAssetUpdate>(json!({ "usage_count": 0 })).is_err());
}

#[tokio::test]
async fn test_asset_null_clears_dimensions() {
    let studio = setup_studio().await;
    let asset = studio.assets.create(banner()).await.unwrap();

    let update: MediaAssetUpdate = parse_input(json!({ "width": null })).unwrap();
    let updated = studio.assets.update(asset.id, update).await.unwrap();
    assert_eq!(updated.width, None);
    assert_eq!(updated.height, Some(200));

    let resized: MediaAssetUpdate = parse_input(json!({ "width": 320, "height": null })).unwrap();
    let resized = studio.assets.update(asset.id, resized).await.unwrap();
    assert_eq!(resized.width, Some(320));
    assert_eq!(resized.height, None);
    assert_eq!(studio.assets.get(asset.id).await.unwrap(), resized);
}

#[tokio::test]
async fn test_asset_negative_size_rejected() {
    let studio = setup_studio().await;
    let err = studio
        .assets
        .create(MediaAssetCreate {
            file_size: -1,
            ..banner()
        })
        .await
        .unwrap_err();
    match err {
        StoreError::Validation(v) => assert!(v.has_field("file_size")),
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert!(studio.assets.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_asset_delete() {
    let studio = setup_studio().await;
    let asset = studio.assets.create(banner()).await.unwrap();
    studio.assets.delete(asset.id).await.unwrap();
    assert!(matches!(
        studio.assets.delete(asset.id).await,
        Err(StoreError::NotFound { entity: "media_asset", .. })
    ));
    assert!(studio.assets.record_usage(asset.id).await.is_err());
}

// =============================================================================
// Layout presets
// =============================================================================

#[tokio::test]
async fn test_preset_defaults_and_filter() {
    let studio = setup_studio().await;
    let plain = studio
        .presets
        .create(parse_input(json!({ "name": "Plain" })).unwrap())
        .await
        .unwrap();
    assert_eq!(plain.layout_config, json!({}));
    assert_eq!(plain.template_type, None);
    assert!(!plain.is_default);
    assert_eq!(plain.usage_count, 0);

    studio
        .presets
        .create(preset("Welcome hero", Some(TemplateType::CourseWelcome), false))
        .await
        .unwrap();

    assert_eq!(studio.presets.list(None).await.unwrap().len(), 2);
    let welcome = studio
        .presets
        .list(Some(TemplateType::CourseWelcome))
        .await
        .unwrap();
    assert_eq!(welcome.len(), 1);
    assert_eq!(welcome[0].name, "Welcome hero");
}

#[tokio::test]
async fn test_single_default_per_template_type() {
    let studio = setup_studio().await;
    let first = studio
        .presets
        .create(preset("First", Some(TemplateType::AssignmentDue), true))
        .await
        .unwrap();
    let second = studio
        .presets
        .create(preset("Second", Some(TemplateType::AssignmentDue), true))
        .await
        .unwrap();
    let other_type = studio
        .presets
        .create(preset("Grades", Some(TemplateType::GradeNotification), true))
        .await
        .unwrap();

    assert!(!studio.presets.get(first.id).await.unwrap().is_default);
    assert!(studio.presets.get(second.id).await.unwrap().is_default);
    assert!(studio.presets.get(other_type.id).await.unwrap().is_default);

    let promoted = studio
        .presets
        .update(
            first.id,
            LayoutPresetUpdate {
                is_default: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(promoted.is_default);
    assert!(!studio.presets.get(second.id).await.unwrap().is_default);
}

#[tokio::test]
async fn test_default_for_falls_back_to_untyped() {
    let studio = setup_studio().await;
    assert!(
        studio
            .presets
            .default_for(TemplateType::CourseReminder)
            .await
            .unwrap()
            .is_none()
    );

    let generic = studio.presets.create(preset("Generic", None, true)).await.unwrap();
    let reminder = studio
        .presets
        .create(preset("Reminder", Some(TemplateType::CourseReminder), true))
        .await
        .unwrap();

    let found = studio
        .presets
        .default_for(TemplateType::CourseReminder)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, reminder.id);

    let fallback = studio
        .presets
        .default_for(TemplateType::CourseCompletion)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fallback.id, generic.id);
}

#[tokio::test]
async fn test_preset_usage_counts_across_paths() {
    let studio = setup_studio().await;
    let template = create_test_template(&studio, "Styled").await;
    let preset = studio.presets.create(preset("Shared", None, false)).await.unwrap();

    studio.presets.record_usage(preset.id).await.unwrap();
    studio
        .templates
        .apply_preset(template.id, preset.id)
        .await
        .unwrap();

    let stored = studio.presets.get(preset.id).await.unwrap();
    assert_eq!(stored.usage_count, 2);
}

#[tokio::test]
async fn test_preset_update_clears_type_and_delete() {
    let studio = setup_studio().await;
    let preset = studio
        .presets
        .create(preset("Typed", Some(TemplateType::CourseStartsToday), false))
        .await
        .unwrap();

    let update: LayoutPresetUpdate = parse_input(json!({ "template_type": null })).unwrap();
    let updated = studio.presets.update(preset.id, update).await.unwrap();
    assert_eq!(updated.template_type, None);
    assert_eq!(updated.name, "Typed");

    assert!(
        parse_input::<LayoutPresetUpdate>(json!({ "template_type": "holiday" })).is_err()
    );

    studio.presets.delete(preset.id).await.unwrap();
    assert!(matches!(
        studio.presets.get(preset.id).await,
        Err(StoreError::NotFound { .. })
    ));
}

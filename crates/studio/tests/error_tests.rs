use email_template_studio::error::{FieldViolation, IntegrityError, StoreError, ValidationError};
use sea_orm::DbErr;

#[test]
fn test_validation_error_display() {
    let err = ValidationError {
        entity: "email_template",
        violations: vec![
            FieldViolation {
                field: "name".to_string(),
                code: "length".to_string(),
                message: "must be at most 200 characters".to_string(),
            },
            FieldViolation {
                field: "subject_line".to_string(),
                code: "required".to_string(),
                message: "missing field `subject_line`".to_string(),
            },
        ],
    };
    assert_eq!(
        err.to_string(),
        "Invalid email_template: name: must be at most 200 characters; subject_line: missing field `subject_line`"
    );
    assert!(err.has_field("subject_line"));
    assert!(!err.has_field("preview_text"));

    let single = ValidationError::single("course", "instructor", "required", "is required");
    assert_eq!(single.to_string(), "Invalid course: instructor: is required");
}

#[test]
fn test_integrity_error_display() {
    let missing = IntegrityError::MissingReference {
        entity: "content_block",
        field: "template_id",
        id: 7,
    };
    assert_eq!(
        missing.to_string(),
        "content_block.template_id references missing record 7"
    );

    let cross = IntegrityError::CrossTemplateReference {
        generation_id: 3,
        expected_template: 1,
        actual_template: 2,
    };
    assert_eq!(
        cross.to_string(),
        "AI generation 3 belongs to template 2, not 1"
    );

    assert!(
        IntegrityError::FailedGeneration(9)
            .to_string()
            .contains("AI generation 9 did not succeed")
    );
    assert_eq!(
        IntegrityError::Constraint("FOREIGN KEY constraint failed".to_string()).to_string(),
        "Constraint violation: FOREIGN KEY constraint failed"
    );
}

#[test]
fn test_store_error_classification() {
    let validation: StoreError =
        ValidationError::single("course", "name", "length", "too long").into();
    assert!(validation.is_validation());
    assert!(!validation.is_integrity());
    // transparent
    assert_eq!(validation.to_string(), "Invalid course: name: too long");

    let integrity: StoreError = IntegrityError::FailedGeneration(1).into();
    assert!(integrity.is_integrity());

    let not_found = StoreError::not_found("media_asset", 12);
    assert_eq!(not_found.to_string(), "media_asset 12 not found");
    assert!(!not_found.is_validation());
    assert!(!not_found.is_integrity());
}

#[test]
fn test_plain_db_errors_stay_database_errors() {
    let err = StoreError::from(DbErr::Custom("connection reset".to_string()));
    assert!(matches!(err, StoreError::Database(_)));
    assert!(err.to_string().starts_with("Database error:"));
}

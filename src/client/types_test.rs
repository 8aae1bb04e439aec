// ABOUTME: Tests for client types - validation rules and JSON format.
// ABOUTME: Verifies the create-application body matches the service API.

use super::types::{validate_children, validate_entity_name};
use super::*;
use crate::error::ClientError;

#[test]
fn test_timestamped_name() {
    let spec = ApplicationSpec::timestamped("Contoso", 1_700_000_000_000, "0.1");
    assert_eq!(spec.name, "Contoso-1700000000000");
    assert_eq!(spec.version_id, "0.1");
    assert_eq!(spec.culture, "en-us");
}

#[test]
fn test_application_spec_json_format() {
    let spec = ApplicationSpec::new("Contoso-1", "0.1").description("sample app");
    let json = serde_json::to_value(&spec).unwrap();

    assert_eq!(json["name"], "Contoso-1");
    assert_eq!(json["culture"], "en-us");
    assert_eq!(json["initialVersionId"], "0.1");
    assert_eq!(json["description"], "sample app");
}

#[test]
fn test_valid_spec_passes() {
    assert!(ApplicationSpec::new("app", "0.1").validate().is_ok());
    assert!(
        ApplicationSpec::new("app", "0.1")
            .culture("zh-Hans-CN")
            .validate()
            .is_ok()
    );
}

#[test]
fn test_empty_name_rejected() {
    let err = ApplicationSpec::new("  ", "0.1").validate().unwrap_err();
    assert!(matches!(err, ClientError::Validation(msg) if msg.contains("name")));
}

#[test]
fn test_empty_version_rejected() {
    let err = ApplicationSpec::new("app", "").validate().unwrap_err();
    assert!(matches!(err, ClientError::Validation(msg) if msg.contains("version")));
}

#[test]
fn test_bad_culture_rejected() {
    for culture in ["", "e", "english", "en_us", "en-"] {
        let result = ApplicationSpec::new("app", "0.1").culture(culture).validate();
        assert!(result.is_err(), "culture {:?} should be rejected", culture);
    }
}

#[test]
fn test_locale_tags() {
    assert!(is_locale_tag("en-us"));
    assert!(is_locale_tag("EN-US"));
    assert!(is_locale_tag("fr"));
    assert!(!is_locale_tag("en us"));
}

#[test]
fn test_entity_spec_accessors() {
    let class = EntitySpec::hierarchical("Class", ["First", "Business", "Economy"]);
    assert_eq!(class.name(), "Class");
    assert_eq!(class.kind(), EntityKind::Hierarchical);
    match class {
        EntitySpec::Hierarchical { children, .. } => {
            assert_eq!(children, vec!["First", "Business", "Economy"]);
        }
        _ => panic!("Expected Hierarchical"),
    }

    let destination = EntitySpec::simple("Destination");
    assert_eq!(destination.kind(), EntityKind::Simple);
    assert_eq!(destination.kind().to_string(), "simple");
}

#[test]
fn test_children_validation() {
    assert!(validate_children(&["a".to_string(), "b".to_string()]).is_ok());
    assert!(validate_children(&[]).is_err());
    assert!(validate_children(&["a".to_string(), "a".to_string()]).is_err());
    assert!(validate_children(&["".to_string()]).is_err());
    assert!(validate_entity_name("").is_err());
}

#[test]
fn test_application_info_deserialization() {
    let json = r#"{
        "id": "A1",
        "name": "Contoso-1",
        "description": "sample",
        "culture": "en-us",
        "activeVersion": "0.1",
        "versionsCount": 1
    }"#;
    let info: ApplicationInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, AppId::new("A1"));
    assert_eq!(info.active_version.as_deref(), Some("0.1"));
    assert_eq!(info.versions_count, 1);
}

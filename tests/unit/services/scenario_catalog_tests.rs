use std::collections::HashSet;

use notify_harness::config::Deployment;
use notify_harness::models::Credential;
use notify_harness::services::scenario_catalog::*;
use notify_harness::services::ScenarioCatalog;

use super::fixtures::{create_test_config, TEST_APPLICANT_UUID, TEST_TOKEN, TEST_VERIFICATION_UUID};

#[test]
fn test_standard_catalog_expectations() {
    let config = create_test_config(Deployment::Idv);
    let scenarios = ScenarioCatalog::new(&config).standard();

    let expected = [
        (VALID_NOTIFICATION, STATUS_CREATED),
        (UNRECOGNIZED_FIELD, STATUS_UNPROCESSABLE_ENTITY),
        (EMPTY_NOTIFICATION, STATUS_BAD_REQUEST),
        (MISSING_VERIFICATION_ID, STATUS_BAD_REQUEST),
        (MISSING_APPLICANT_ID, STATUS_CREATED),
        (NULL_VERIFICATION_ID, STATUS_BAD_REQUEST),
        (WRONG_TOKEN, STATUS_UNAUTHORIZED),
        (EMPTY_CREDENTIAL, STATUS_UNAUTHORIZED),
        (NO_AUTHORIZATION_HEADER, STATUS_UNAUTHORIZED),
    ];

    assert_eq!(scenarios.len(), expected.len());
    for (scenario, (name, status)) in scenarios.iter().zip(expected.iter()) {
        assert_eq!(scenario.name, *name);
        assert_eq!(scenario.expected_status, *status, "scenario {}", name);
    }

    let names: HashSet<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), scenarios.len());
}

#[test]
fn test_valid_notification_uses_configured_identifiers() {
    let config = create_test_config(Deployment::Idv);
    let scenario = ScenarioCatalog::new(&config).valid_notification();

    assert_eq!(
        scenario.record.get("verification_uuid"),
        Some(&Some(TEST_VERIFICATION_UUID.to_string()))
    );
    assert_eq!(
        scenario.record.get("applicant_uuid"),
        Some(&Some(TEST_APPLICANT_UUID.to_string()))
    );
    assert_eq!(scenario.credential, Credential::token(TEST_TOKEN));
    assert!(scenario.known_issue.is_none());
}

#[test]
fn test_rv_deployment_uses_check_uuid() {
    let config = create_test_config(Deployment::Rv);
    let catalog = ScenarioCatalog::new(&config);

    let valid = catalog.valid_notification();
    assert!(valid.record.contains_key("check_uuid"));
    assert!(!valid.record.contains_key("verification_uuid"));

    let null_case = catalog.null_verification_id();
    assert_eq!(null_case.record.get("check_uuid"), Some(&None));
}

#[test]
fn test_unrecognized_field_replaces_verification_key() {
    let config = create_test_config(Deployment::Idv);
    let scenario = ScenarioCatalog::new(&config).unrecognized_field();

    assert_eq!(
        scenario.record.get(UNRECOGNIZED_FIELD_KEY),
        Some(&Some(TEST_VERIFICATION_UUID.to_string()))
    );
    assert!(!scenario.record.contains_key("verification_uuid"));
    assert!(scenario.record.contains_key("applicant_uuid"));
}

#[test]
fn test_empty_and_missing_verification_records() {
    let config = create_test_config(Deployment::Idv);
    let catalog = ScenarioCatalog::new(&config);

    assert!(catalog.empty_notification().record.is_empty());

    let missing = catalog.missing_verification_id();
    assert_eq!(missing.record.len(), 1);
    assert!(missing.record.contains_key("applicant_uuid"));
}

#[test]
fn test_missing_applicant_reproduces_observed_quirk() {
    let config = create_test_config(Deployment::Idv);
    let scenario = ScenarioCatalog::new(&config).missing_applicant_id();

    assert_eq!(scenario.expected_status, STATUS_CREATED);
    assert_eq!(scenario.record.len(), 1);
    assert_eq!(
        scenario.record.get("verification_uuid"),
        Some(&Some(TEST_APPLICANT_UUID.to_string()))
    );
    assert_eq!(scenario.known_issue.as_deref(), Some(MISSING_APPLICANT_NOTE));
}

#[test]
fn test_null_verification_record() {
    let config = create_test_config(Deployment::Idv);
    let scenario = ScenarioCatalog::new(&config).null_verification_id();

    assert_eq!(scenario.record.get("verification_uuid"), Some(&None));
    assert_eq!(
        scenario.record.get("applicant_uuid"),
        Some(&Some("SomeUUID".to_string()))
    );
}

#[test]
fn test_rv_credential_seeds_follow_deployment() {
    let config = create_test_config(Deployment::Rv);
    let catalog = ScenarioCatalog::new(&config);

    let null_case = catalog.null_verification_id();
    assert_eq!(null_case.record.get("check_uuid"), Some(&None));
    assert_eq!(
        null_case.record.get("applicant_uuid"),
        Some(&Some("SomeKey".to_string()))
    );

    // base64("TheWrongKey")
    assert_eq!(
        catalog.wrong_token().credential,
        Credential::token("VGhlV3JvbmdLZXk=")
    );
}

#[test]
fn test_authorization_scenarios_credentials() {
    let config = create_test_config(Deployment::Idv);
    let catalog = ScenarioCatalog::new(&config);

    assert_eq!(
        catalog.wrong_token().credential,
        Credential::token("VGhlV3JvbmdUb2tlbg==")
    );
    assert_eq!(catalog.empty_credential().credential, Credential::token(""));
    assert_eq!(catalog.no_authorization_header().credential, Credential::Absent);

    for scenario in [
        catalog.wrong_token(),
        catalog.empty_credential(),
        catalog.no_authorization_header(),
    ] {
        assert_eq!(scenario.record, catalog.valid_record());
    }
}

#[test]
fn test_resubmission_is_opt_in() {
    let mut config = create_test_config(Deployment::Idv);
    assert_eq!(ScenarioCatalog::new(&config).all().len(), 9);

    config.scenarios.resubmit_valid = true;
    let all = ScenarioCatalog::new(&config).all();
    assert_eq!(all.len(), 10);

    let resubmitted = all.last().unwrap();
    assert_eq!(resubmitted.name, VALID_NOTIFICATION_RESUBMITTED);
    assert_eq!(resubmitted.expected_status, STATUS_CREATED);
    assert_eq!(resubmitted.record, all[0].record);
}

#[test]
fn test_selected_filters_by_name_in_catalog_order() {
    let mut config = create_test_config(Deployment::Idv);
    config.scenarios.only = vec![
        NO_AUTHORIZATION_HEADER.to_string(),
        EMPTY_NOTIFICATION.to_string(),
    ];

    let selected = ScenarioCatalog::new(&config).selected().unwrap();
    let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec![EMPTY_NOTIFICATION, NO_AUTHORIZATION_HEADER]);
}

#[test]
fn test_selected_rejects_unknown_names() {
    let mut config = create_test_config(Deployment::Idv);
    config.scenarios.only = vec!["does_not_exist".to_string()];

    let err = ScenarioCatalog::new(&config).selected().unwrap_err();
    assert!(err.to_string().contains("Unknown scenario 'does_not_exist'"));
}

#[test]
fn test_selected_resubmission_requires_opt_in() {
    let mut config = create_test_config(Deployment::Idv);
    config.scenarios.only = vec![VALID_NOTIFICATION_RESUBMITTED.to_string()];
    assert!(ScenarioCatalog::new(&config).selected().is_err());

    config.scenarios.resubmit_valid = true;
    assert_eq!(ScenarioCatalog::new(&config).selected().unwrap().len(), 1);
}

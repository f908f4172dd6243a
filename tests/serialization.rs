//! Wire-format tests for platform payloads.
//!
//! These tests verify:
//! - camelCase field names on request bodies
//! - optional request fields are omitted when unset
//! - recorded platform responses decode through the envelope

mod common;

use acrolinx::envelope::{self, Outcome};
use acrolinx::types::*;
use common::fixture;
use serde_json::json;

// ============================================================================
// Requests
// ============================================================================

#[test]
fn credentials_wire_format() {
    let creds = Credentials {
        username: "alice".to_string(),
        password: "secret".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&creds).unwrap(),
        json!({"username": "alice", "password": "secret"})
    );
}

#[test]
fn default_submission_has_only_content() {
    assert_eq!(
        serde_json::to_value(SubmitCheckOptions::default()).unwrap(),
        json!({"content": ""})
    );
}

#[test]
fn check_options_keep_empty_strings_but_drop_empty_lists() {
    let options = CheckOptions {
        guidance_profile_id: "p1".to_string(),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({
            "guidanceProfileId": "p1",
            "contentFormat": "",
            "checkType": "",
            "batchId": ""
        })
    );
}

#[test]
fn content_encoding_is_lowercase() {
    assert_eq!(
        serde_json::to_string(&ContentEncoding::Base64).unwrap(),
        r#""base64""#
    );
    assert_eq!(
        serde_json::to_string(&ContentEncoding::None).unwrap(),
        r#""none""#
    );
}

#[test]
fn suggestion_icon_id_is_camel_case() {
    let suggestion: Suggestion = serde_json::from_value(json!({
        "surface": "isn't",
        "groupId": "g",
        "replacements": ["is not"],
        "iconId": "contraction"
    }))
    .unwrap();
    assert_eq!(suggestion.icon_id, "contraction");
}

// ============================================================================
// Recorded responses
// ============================================================================

#[test]
fn sign_in_fixture_carries_token() {
    let (token, links) = envelope::parse::<AccessToken>(fixture("sign_in.json").as_bytes())
        .unwrap()
        .into_data()
        .unwrap();
    assert!(!token.is_empty());
    assert!(links.contains_key("getLicenseData"));
}

#[test]
fn error_fixture_is_an_error_outcome() {
    let env = envelope::parse::<Capabilities>(fixture("error.json").as_bytes()).unwrap();
    match env.into_outcome() {
        Outcome::Error(err) => {
            assert_eq!(err.error_type, "https://acrolinx.com/errors/client-signature-invalid");
            assert_eq!(err.status, 400);
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn capabilities_fixture_with_empty_error_is_a_result() {
    let env = envelope::parse::<Capabilities>(fixture("get_capabilities.json").as_bytes()).unwrap();
    assert!(env.error.is_some());
    assert!(env.reported_error().is_none());

    let outcome = env.into_outcome();
    assert!(!outcome.is_error());
    assert!(!outcome.is_progress());
    assert_eq!(outcome.links().map(|l| l.len()), Some(2));
}

#[test]
fn progress_fixture_is_a_progress_outcome() {
    let env = envelope::parse::<CheckResult>(fixture("progress.json").as_bytes()).unwrap();
    match env.into_outcome() {
        Outcome::Progress { progress, links } => {
            assert_eq!(progress.percent, 27);
            assert_eq!(progress.retry_after, 1);
            assert!(links.contains_key("poll"));
        }
        other => panic!("expected progress, got {other:?}"),
    }
}

#[test]
fn check_result_fixture_with_zero_progress_is_a_result() {
    let env = envelope::parse::<CheckResult>(fixture("check_result.json").as_bytes()).unwrap();
    assert!(env.progress.is_some());
    assert!(env.reported_progress().is_none());

    match env.into_outcome() {
        Outcome::Result { data, .. } => {
            assert_eq!(data.id, "052929ee-be0c-46a7-87ce-eebd308fef6e");
            assert_eq!(
                data.report("scorecard").map(|r| r.display_name.as_str()),
                Some("Score Card")
            );
            assert_eq!(data.issues[0].subtree_len(), 2);
        }
        other => panic!("expected result, got {other:?}"),
    }
}

#[test]
fn check_result_reserializes_with_platform_names() {
    let result = match envelope::decode::<CheckResult>(fixture("check_result.json").as_bytes()) {
        Ok(Outcome::Result { data, .. }) => data,
        other => panic!("expected result, got {other:?}"),
    };
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["checkOptions"]["guidanceProfileName"], "Content and Creative");
    assert!(value["issues"][0]["displayNameHtml"]
        .as_str()
        .is_some_and(|s| s.starts_with("<div")));
    assert_eq!(value["issues"][0]["subIssues"][0]["debug"]["penalty"], 1000.0);
    assert_eq!(value["runtimeStatistics"]["startedAt"], "2022-10-10T11:55:19.603Z");
    // Suggestions without an icon omit the field.
    assert!(value["issues"][0]["suggestions"][0].get("iconId").is_none());
}

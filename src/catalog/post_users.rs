use serde_json::{json, Value};

use crate::assertion::Expectation;
use crate::config::HarnessConfig;

use super::model::{Case, Catalog, CatalogKind, Scenario};

const GENERATED: [&str; 2] = ["id", "createdAt"];

/// Status 201, a generated id and timestamp, the submitted name and job
/// echoed back verbatim, and nothing beyond the payload's own keys plus the
/// generated ones.
fn created(payload: &Value) -> Vec<Expectation> {
    let submitted = payload.as_object().into_iter().flat_map(|map| map.keys().cloned());
    let allowed: Vec<String> = submitted
        .chain(GENERATED.iter().map(|key| key.to_string()))
        .collect();

    let mut expectations = vec![Expectation::status(201), Expectation::keys(GENERATED)];
    for field in ["name", "job"] {
        if let Some(value) = payload.get(field) {
            expectations.push(Expectation::equals_at(&format!("/{field}"), value.clone()));
        }
    }
    expectations.push(Expectation::keys_within("", allowed));
    expectations
}

/// Posts `payload` and expects the creation contract for it.
fn creation(name: &str, payload: Value) -> Case {
    let expectations = created(&payload);
    Case::single(Scenario::post(name, "users").json(payload), expectations)
}

fn rejected() -> Vec<Expectation> {
    vec![Expectation::status(400)]
}

pub fn catalog(config: &HarnessConfig) -> Catalog {
    let post = |name: &str, body: Value| Scenario::post(name, "users").json(body);
    let long_string = "a".repeat(1000);

    let cases = vec![
        creation(
            "successful_post",
            json!({"name": "morpheus", "job": "leader"}),
        ),
        Case::single(
            post(
                "post_response_json_structure",
                json!({"name": "neo", "job": "the one"}),
            ),
            vec![
                Expectation::status(201),
                Expectation::keys(["name", "job", "id", "createdAt"]),
            ],
        ),
        Case::single(post("post_with_empty_payload", json!({})), rejected()),
        Case::single(
            post(
                "post_with_invalid_payload",
                json!({"invalid_field": "value"}),
            ),
            rejected(),
        ),
        Case::single(
            post("timeout_scenario", json!({"name": "trinity", "job": "hacker"}))
                .timeout(config.probe_timeout),
            vec![Expectation::TimeoutExpected],
        ),
        Case::distinct(
            post(
                "duplicate_user_creation",
                json!({"name": "morpheus", "job": "leader"}),
            ),
            vec![Expectation::status(201), Expectation::keys(["id"])],
            "/id",
        ),
        creation(
            "long_strings_in_payload",
            json!({"name": long_string, "job": long_string}),
        ),
        Case::single(
            post(
                "post_with_missing_required_fields",
                json!({"name": "missing job"}),
            ),
            rejected(),
        ),
        // Additive fields are accepted on creation and may be echoed,
        // unlike the PUT catalog.
        creation(
            "post_with_additional_unspecified_fields",
            json!({"name": "additional", "job": "fields", "extra_field": "extra_value"}),
        ),
    ];

    Catalog {
        kind: CatalogKind::PostUsers,
        cases,
    }
}

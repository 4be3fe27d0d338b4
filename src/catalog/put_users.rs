use serde_json::{json, Map, Value};

use crate::assertion::Expectation;
use crate::config::HarnessConfig;

use super::model::{Case, Catalog, CatalogKind, Scenario};

const TARGET: &str = "users/2";
const LARGE_FIELD_COUNT: usize = 1000;

/// The endpoint accepts any payload shape with the same contract.
fn updated() -> Vec<Expectation> {
    vec![Expectation::status(200), Expectation::keys(["updatedAt"])]
}

fn large_payload() -> Value {
    let mut fields = Map::new();
    fields.insert("name".to_string(), json!("large"));
    fields.insert("job".to_string(), json!("payload"));
    for i in 0..LARGE_FIELD_COUNT {
        fields.insert(format!("key{i}"), json!("value"));
    }
    Value::Object(fields)
}

pub fn catalog(config: &HarnessConfig) -> Catalog {
    let put = |name: &str, body: Value| Scenario::put(name, TARGET).json(body);
    let long_string = "a".repeat(1000);

    let shaped = [
        ("put_with_empty_payload", json!({})),
        ("put_with_invalid_payload", json!({"invalid_field": "value"})),
        ("long_strings_in_payload", json!({"name": long_string, "job": long_string})),
        ("put_with_missing_required_fields", json!({"name": "missing job"})),
        ("large_payload", large_payload()),
        (
            "special_characters_in_payload",
            json!({"name": "name!@#$%^&*()", "job": "job!@#$%^&*()"}),
        ),
        ("numeric_values_in_fields", json!({"name": 123, "job": 456})),
        ("null_values_in_fields", json!({"name": null, "job": null})),
        ("boolean_values_in_fields", json!({"name": true, "job": false})),
        (
            "array_in_fields",
            json!({"name": ["name1", "name2"], "job": ["job1", "job2"]}),
        ),
        (
            "object_in_fields",
            json!({
                "name": {"first": "John", "last": "Doe"},
                "job": {"title": "developer", "company": "company"}
            }),
        ),
    ];

    let mut cases = vec![
        Case::single(
            put(
                "successful_put",
                json!({"name": "morpheus", "job": "zion resident"}),
            ),
            updated(),
        ),
        Case::single(
            put(
                "put_response_json_structure",
                json!({"name": "neo", "job": "the one"}),
            ),
            vec![
                Expectation::status(200),
                Expectation::keys(["name", "job", "updatedAt"]),
            ],
        ),
        Case::single(
            put("timeout_scenario", json!({"name": "trinity", "job": "hacker"}))
                .timeout(config.probe_timeout),
            vec![Expectation::TimeoutExpected],
        ),
        Case::single(
            put(
                "put_with_additional_unspecified_fields",
                json!({"name": "additional", "job": "fields", "extra_field": "extra_value"}),
            ),
            vec![
                Expectation::status(200),
                Expectation::absent("extra_field"),
                Expectation::keys(["updatedAt"]),
            ],
        ),
    ];

    cases.extend(
        shaped
            .into_iter()
            .map(|(name, body)| Case::single(put(name, body), updated())),
    );

    Catalog {
        kind: CatalogKind::PutUsers,
        cases,
    }
}

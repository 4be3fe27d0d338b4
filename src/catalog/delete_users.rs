use serde_json::json;

use crate::assertion::Expectation;
use crate::config::HarnessConfig;

use super::model::{Case, Catalog, CatalogKind, Scenario};

const TARGET: &str = "users/2";

fn deleted() -> Vec<Expectation> {
    vec![Expectation::status(204)]
}

pub fn catalog(config: &HarnessConfig) -> Catalog {
    let cases = vec![
        Case::single(
            Scenario::delete("successful_delete", TARGET),
            vec![Expectation::status(204), Expectation::EmptyBody],
        ),
        Case::single(
            Scenario::delete("delete_non_existent_user", "users/9999"),
            vec![Expectation::status(204), Expectation::EmptyBody],
        ),
        Case::single(
            Scenario::delete("delete_with_invalid_endpoint", "userz/2"),
            vec![Expectation::status(404)],
        ),
        Case::single(
            Scenario::post("delete_with_invalid_method", TARGET),
            vec![Expectation::status(405)],
        ),
        Case::single(
            Scenario::delete("timeout_scenario", TARGET).timeout(config.probe_timeout),
            vec![Expectation::TimeoutExpected],
        ),
        // Incidental request decoration must not change the outcome.
        Case::single(
            Scenario::delete("delete_with_query_parameters", TARGET).query("param", "value"),
            deleted(),
        ),
        Case::single(
            Scenario::delete("delete_with_headers", TARGET).header("Custom-Header", "value"),
            deleted(),
        ),
        Case::single(
            Scenario::delete("delete_with_body", TARGET).json(json!({"name": "morpheus"})),
            deleted(),
        ),
        Case::single(
            Scenario::delete("delete_with_authentication", TARGET).basic_auth("user", "pass"),
            deleted(),
        ),
        Case::single(
            Scenario::delete("delete_with_invalid_authentication", TARGET)
                .basic_auth("invalid_user", "invalid_pass"),
            deleted(),
        ),
    ];

    Catalog {
        kind: CatalogKind::DeleteUsers,
        cases,
    }
}

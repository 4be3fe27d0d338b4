use serde_json::json;

use crate::assertion::{Expectation, Shape};
use crate::config::HarnessConfig;

use super::model::{Case, Catalog, CatalogKind, Scenario};

const LISTING_KEYS: [&str; 5] = ["page", "per_page", "total", "total_pages", "data"];
const USER_KEYS: [&str; 5] = ["id", "email", "first_name", "last_name", "avatar"];

pub fn catalog(config: &HarnessConfig) -> Catalog {
    let page = |name: &str, value: &str| Scenario::get(name, "users").query("page", value);

    let cases = vec![
        Case::single(
            page("successful_response", "2"),
            vec![Expectation::status(200)],
        ),
        Case::single(
            page("response_json_structure", "2"),
            vec![Expectation::status(200), Expectation::keys(LISTING_KEYS)],
        ),
        Case::single(
            page("data_integrity", "2"),
            vec![
                Expectation::type_at("/data", Shape::Sequence),
                Expectation::each_keys_at("/data", USER_KEYS),
            ],
        ),
        // Provider behavior for a non-numeric page is undocumented; any 2xx
        // listing is accepted.
        Case::single(
            page("invalid_page_parameter", "invalid"),
            vec![
                Expectation::StatusSuccess,
                Expectation::type_at("/data", Shape::Sequence),
            ],
        ),
        Case::single(
            page("empty_response", "9999"),
            vec![
                Expectation::status(200),
                Expectation::equals_at("/data", json!([])),
            ],
        ),
        Case::single(
            page("timeout_scenario", "2").timeout(config.probe_timeout),
            vec![Expectation::TimeoutExpected],
        ),
    ];

    Catalog {
        kind: CatalogKind::GetUsers,
        cases,
    }
}

use crate::assertion::{Expectation, Shape};
use crate::config::HarnessConfig;

use super::model::{Case, Catalog, CatalogKind, Scenario};

const RESOURCE_KEYS: [&str; 5] = ["id", "name", "year", "color", "pantone_value"];

pub fn catalog(config: &HarnessConfig) -> Catalog {
    let cases = vec![
        Case::single(
            Scenario::get("successful_response", "unknown/2"),
            vec![Expectation::status(200)],
        ),
        Case::single(
            Scenario::get("response_json_structure", "unknown/2"),
            vec![
                Expectation::status(200),
                Expectation::keys(["data", "support"]),
            ],
        ),
        Case::single(
            Scenario::get("data_integrity", "unknown/2"),
            vec![
                Expectation::type_at("/data", Shape::Mapping),
                Expectation::keys_at("/data", RESOURCE_KEYS),
            ],
        ),
        Case::single(
            Scenario::get("invalid_resource", "unknown/9999"),
            vec![Expectation::status(404)],
        ),
        Case::single(
            Scenario::get("timeout_scenario", "unknown/2").timeout(config.probe_timeout),
            vec![Expectation::TimeoutExpected],
        ),
    ];

    Catalog {
        kind: CatalogKind::GetUnknown,
        cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_resource_expects_not_found() {
        let catalog = catalog(&HarnessConfig::default());
        let case = catalog.case("invalid_resource").expect("scenario exists");
        assert_eq!(case.scenario().path, "unknown/9999");
        assert_eq!(case.expectations(), &[Expectation::status(404)]);
    }
}

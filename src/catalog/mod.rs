mod delete_users;
mod get_unknown;
mod get_users;
mod model;
mod post_users;
mod put_users;

pub use model::{Case, Catalog, CatalogKind, Scenario};

use crate::config::HarnessConfig;

impl CatalogKind {
    pub fn build(self, config: &HarnessConfig) -> Catalog {
        match self {
            Self::GetUsers => get_users::catalog(config),
            Self::GetUnknown => get_unknown::catalog(config),
            Self::PostUsers => post_users::catalog(config),
            Self::PutUsers => put_users::catalog(config),
            Self::DeleteUsers => delete_users::catalog(config),
        }
    }
}

pub fn all(config: &HarnessConfig) -> Vec<Catalog> {
    select(config, &CatalogKind::ALL)
}

/// Builds the requested catalogs in the order given, skipping repeats.
pub fn select(config: &HarnessConfig, kinds: &[CatalogKind]) -> Vec<Catalog> {
    let mut seen = Vec::with_capacity(kinds.len());
    kinds
        .iter()
        .copied()
        .filter(|kind| {
            if seen.contains(kind) {
                false
            } else {
                seen.push(*kind);
                true
            }
        })
        .map(|kind| kind.build(config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_names_are_unique_within_each_catalog() {
        for catalog in all(&HarnessConfig::default()) {
            let names: HashSet<_> = catalog.cases.iter().map(Case::name).collect();
            assert_eq!(names.len(), catalog.cases.len(), "{}", catalog.name());
        }
    }

    #[test]
    fn every_catalog_declares_a_timeout_probe() {
        let config = HarnessConfig::default();
        for catalog in all(&config) {
            let probe = catalog.case("timeout_scenario").expect("timeout scenario");
            assert_eq!(probe.scenario().timeout, Some(config.probe_timeout));
        }
    }

    #[test]
    fn select_keeps_order_and_drops_repeats() {
        let config = HarnessConfig::default();
        let selected = select(
            &config,
            &[
                CatalogKind::DeleteUsers,
                CatalogKind::GetUsers,
                CatalogKind::DeleteUsers,
            ],
        );
        let kinds: Vec<_> = selected.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CatalogKind::DeleteUsers, CatalogKind::GetUsers]);
    }
}

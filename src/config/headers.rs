use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{HarnessError, Result};

static HEADER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9!#$%&'*+.^_`|~-]+$").expect("valid regex"));

/// Parses a `Name: value` header flag.
pub fn parse_header(line: &str) -> Result<(String, String)> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| HarnessError::InvalidHeader(line.to_string()))?;
    let name = name.trim();
    if !HEADER_NAME.is_match(name) {
        return Err(HarnessError::InvalidHeader(line.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Combines scenario headers with the run-wide defaults. Scenario headers
/// win on a case-insensitive name match.
pub fn merge_headers(
    scenario: &[(String, String)],
    defaults: &[(String, String)],
) -> Vec<(String, String)> {
    let mut present: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(scenario.len() + defaults.len());

    for (name, value) in scenario {
        present.insert(name.to_ascii_lowercase());
        result.push((name.clone(), value.clone()));
    }

    for (name, value) in defaults {
        if present.insert(name.to_ascii_lowercase()) {
            result.push((name.clone(), value.clone()));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_trims_name_and_value() -> Result<()> {
        let (name, value) = parse_header("x-api-key:  reqres-free-v1 ")?;
        assert_eq!(name, "x-api-key");
        assert_eq!(value, "reqres-free-v1");

        let (_, value) = parse_header("Authorization: Bearer a:b")?;
        assert_eq!(value, "Bearer a:b");
        Ok(())
    }

    #[test]
    fn parse_header_rejects_malformed_lines() {
        let err = parse_header("no-colon-here").unwrap_err();
        assert!(err.to_string().contains("Invalid header line"));
        assert!(parse_header("bad name: value").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn scenario_headers_override_defaults() {
        let scenario = vec![("Custom-Header".to_string(), "value".to_string())];
        let defaults = vec![
            ("custom-header".to_string(), "default".to_string()),
            ("x-api-key".to_string(), "key".to_string()),
        ];

        let merged = merge_headers(&scenario, &defaults);
        assert_eq!(merged.len(), 2);
        assert!(merged
            .iter()
            .any(|(n, v)| n == "Custom-Header" && v == "value"));
        assert!(merged.iter().any(|(n, v)| n == "x-api-key" && v == "key"));
    }
}

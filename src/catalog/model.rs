use std::{fmt, time::Duration};

use reqwest::Method;
use serde_json::Value;

use crate::assertion::Expectation;
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::invoker::{BasicAuth, InvocationRequest};

/// One fully-specified request. Built once when its catalog is built and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub method: Method,
    /// Resource path relative to the configured base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub auth: Option<BasicAuth>,
    pub timeout: Option<Duration>,
}

impl Scenario {
    pub fn new(name: &str, method: Method, path: &str) -> Self {
        Self {
            name: name.to_string(),
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            auth: None,
            timeout: None,
        }
    }

    pub fn get(name: &str, path: &str) -> Self {
        Self::new(name, Method::GET, path)
    }

    pub fn post(name: &str, path: &str) -> Self {
        Self::new(name, Method::POST, path)
    }

    pub fn put(name: &str, path: &str) -> Self {
        Self::new(name, Method::PUT, path)
    }

    pub fn delete(name: &str, path: &str) -> Self {
        Self::new(name, Method::DELETE, path)
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn request(&self, config: &HarnessConfig) -> Result<InvocationRequest> {
        Ok(InvocationRequest {
            method: self.method.clone(),
            url: config.endpoint(&self.path, &self.query)?,
            body: self.body.clone(),
            headers: self.headers.clone(),
            auth: self.auth.clone(),
            timeout: self.timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Case {
    /// One invocation checked against an ordered list of expectations.
    Single {
        scenario: Scenario,
        expectations: Vec<Expectation>,
    },
    /// The same request sent twice in order. Each response must meet
    /// `expectations` and the value at `field` must differ between them.
    Distinct {
        scenario: Scenario,
        expectations: Vec<Expectation>,
        field: String,
    },
}

impl Case {
    pub fn single(scenario: Scenario, expectations: Vec<Expectation>) -> Self {
        Self::Single {
            scenario,
            expectations,
        }
    }

    pub fn distinct(scenario: Scenario, expectations: Vec<Expectation>, field: &str) -> Self {
        Self::Distinct {
            scenario,
            expectations,
            field: field.to_string(),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        match self {
            Self::Single { scenario, .. } | Self::Distinct { scenario, .. } => scenario,
        }
    }

    pub fn name(&self) -> &str {
        &self.scenario().name
    }

    pub fn expectations(&self) -> &[Expectation] {
        match self {
            Self::Single { expectations, .. } | Self::Distinct { expectations, .. } => {
                expectations
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CatalogKind {
    GetUsers,
    GetUnknown,
    PostUsers,
    PutUsers,
    DeleteUsers,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 5] = [
        CatalogKind::GetUsers,
        CatalogKind::GetUnknown,
        CatalogKind::PostUsers,
        CatalogKind::PutUsers,
        CatalogKind::DeleteUsers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetUsers => "get-users",
            Self::GetUnknown => "get-unknown",
            Self::PostUsers => "post-users",
            Self::PutUsers => "put-users",
            Self::DeleteUsers => "delete-users",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub cases: Vec<Case>,
}

impl Catalog {
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.name() == name)
    }
}

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub auth: Option<BasicAuth>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Empty,
    Unparseable(String),
}

impl ResponseBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Unparseable(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed { status: u16, body: ResponseBody },
    TimedOut,
    TransportError(String),
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::TimedOut => "timed-out",
            Self::TransportError(_) => "transport-error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub method: Method,
    pub url: Url,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl InvocationResult {
    pub fn status(&self) -> Option<u16> {
        match &self.outcome {
            Outcome::Completed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        match &self.outcome {
            Outcome::Completed { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn json(&self) -> Option<&Value> {
        self.body().and_then(ResponseBody::json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_body_classifies_payloads() {
        assert_eq!(ResponseBody::from_bytes(b""), ResponseBody::Empty);
        assert_eq!(
            ResponseBody::from_bytes(br#"{"id":"7"}"#),
            ResponseBody::Json(json!({"id": "7"}))
        );
        assert_eq!(
            ResponseBody::from_bytes(b"<html>Not Found</html>"),
            ResponseBody::Unparseable("<html>Not Found</html>".to_string())
        );
    }

    #[test]
    fn status_and_json_only_exist_for_completed_calls() {
        let url = Url::parse("https://example.com/users").unwrap();
        let completed = InvocationResult {
            method: Method::GET,
            url: url.clone(),
            outcome: Outcome::Completed {
                status: 200,
                body: ResponseBody::Json(json!([])),
            },
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(completed.status(), Some(200));
        assert_eq!(completed.json(), Some(&json!([])));

        let timed_out = InvocationResult {
            outcome: Outcome::TimedOut,
            ..completed
        };
        assert_eq!(timed_out.status(), None);
        assert!(timed_out.json().is_none());
        assert_eq!(timed_out.outcome.kind(), "timed-out");
    }
}

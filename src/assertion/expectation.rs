use std::fmt;

use serde_json::Value;

use crate::invoker::{InvocationResult, Outcome, ResponseBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sequence,
    Mapping,
}

impl Shape {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Sequence => value.is_array(),
            Self::Mapping => value.is_object(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

/// A declared expectation about one invocation.
///
/// `at` fields are JSON pointers into the response body; `""` is the body
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    StatusEquals(u16),
    /// Any 2xx status.
    StatusSuccess,
    KeysPresent { at: String, keys: Vec<String> },
    /// Every element of the sequence at `at` carries `keys`.
    EachKeysPresent { at: String, keys: Vec<String> },
    TypeIs { at: String, shape: Shape },
    KeyAbsent { at: String, key: String },
    /// The mapping at `at` carries no key outside `allowed`.
    KeysWithin { at: String, allowed: Vec<String> },
    FieldEquals { at: String, value: Value },
    EmptyBody,
    TimeoutExpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

impl Expectation {
    pub fn status(code: u16) -> Self {
        Self::StatusEquals(code)
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::keys_at("", keys)
    }

    pub fn keys_at<I, S>(at: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::KeysPresent {
            at: at.to_string(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn each_keys_at<I, S>(at: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::EachKeysPresent {
            at: at.to_string(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_at(at: &str, shape: Shape) -> Self {
        Self::TypeIs {
            at: at.to_string(),
            shape,
        }
    }

    pub fn absent(key: &str) -> Self {
        Self::KeyAbsent {
            at: String::new(),
            key: key.to_string(),
        }
    }

    pub fn keys_within<I, S>(at: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::KeysWithin {
            at: at.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn equals_at(at: &str, value: Value) -> Self {
        Self::FieldEquals {
            at: at.to_string(),
            value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StatusEquals(_) => "status-equals",
            Self::StatusSuccess => "status-success",
            Self::KeysPresent { .. } => "keys-present",
            Self::EachKeysPresent { .. } => "each-keys-present",
            Self::TypeIs { .. } => "type-is",
            Self::KeyAbsent { .. } => "key-absent",
            Self::KeysWithin { .. } => "keys-within",
            Self::FieldEquals { .. } => "field-equals",
            Self::EmptyBody => "empty-body",
            Self::TimeoutExpected => "timeout-expected",
        }
    }

    pub fn evaluate(&self, result: &InvocationResult) -> Verdict {
        match (&result.outcome, self) {
            (Outcome::Completed { status, body }, _) => self.evaluate_response(*status, body),
            (Outcome::TimedOut, Self::TimeoutExpected) => {
                Verdict::pass("request timed out as expected")
            }
            (Outcome::TransportError(message), Self::TimeoutExpected) => Verdict::fail(format!(
                "expected a timeout but the transport failed: {message}"
            )),
            (other, _) => Verdict::fail(format!(
                "{} cannot be checked: request {}",
                self.label(),
                other.kind()
            )),
        }
    }

    fn evaluate_response(&self, status: u16, body: &ResponseBody) -> Verdict {
        match self {
            Self::StatusEquals(expected) => {
                if status == *expected {
                    Verdict::pass(format!("status {status}"))
                } else {
                    Verdict::fail(format!("expected status {expected}, got {status}"))
                }
            }
            Self::StatusSuccess => {
                if (200..300).contains(&status) {
                    Verdict::pass(format!("status {status}"))
                } else {
                    Verdict::fail(format!("expected a 2xx status, got {status}"))
                }
            }
            Self::KeysPresent { at, keys } => match locate(body, at) {
                Ok(value) => check_keys(value, keys, at),
                Err(message) => Verdict::fail(message),
            },
            Self::EachKeysPresent { at, keys } => match locate(body, at) {
                Ok(Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        let verdict = check_keys(item, keys, &format!("{at}/{index}"));
                        if !verdict.passed {
                            return verdict;
                        }
                    }
                    Verdict::pass(format!("{} element(s) carry the expected keys", items.len()))
                }
                Ok(other) => Verdict::fail(format!(
                    "expected a sequence at {}, found {}",
                    display_pointer(at),
                    describe(other)
                )),
                Err(message) => Verdict::fail(message),
            },
            Self::TypeIs { at, shape } => match locate(body, at) {
                Ok(value) if shape.matches(value) => {
                    Verdict::pass(format!("{} is a {shape}", display_pointer(at)))
                }
                Ok(value) => Verdict::fail(format!(
                    "expected {} to be a {shape}, found {}",
                    display_pointer(at),
                    describe(value)
                )),
                Err(message) => Verdict::fail(message),
            },
            Self::KeyAbsent { at, key } => match locate(body, at) {
                Ok(Value::Object(map)) if map.contains_key(key) => Verdict::fail(format!(
                    "key '{key}' should not be present at {}",
                    display_pointer(at)
                )),
                Ok(Value::Object(_)) => Verdict::pass(format!("key '{key}' is absent")),
                Ok(other) => Verdict::fail(format!(
                    "expected a mapping at {}, found {}",
                    display_pointer(at),
                    describe(other)
                )),
                Err(message) => Verdict::fail(message),
            },
            Self::KeysWithin { at, allowed } => match locate(body, at) {
                Ok(Value::Object(map)) => {
                    let unexpected: Vec<&str> = map
                        .keys()
                        .filter(|key| !allowed.contains(key))
                        .map(String::as_str)
                        .collect();
                    if unexpected.is_empty() {
                        Verdict::pass(format!("no unexpected keys at {}", display_pointer(at)))
                    } else {
                        Verdict::fail(format!(
                            "unexpected key(s) at {}: {}",
                            display_pointer(at),
                            unexpected.join(", ")
                        ))
                    }
                }
                Ok(other) => Verdict::fail(format!(
                    "expected a mapping at {}, found {}",
                    display_pointer(at),
                    describe(other)
                )),
                Err(message) => Verdict::fail(message),
            },
            Self::FieldEquals { at, value } => match locate(body, at) {
                Ok(actual) if actual == value => {
                    Verdict::pass(format!("{} equals {value}", display_pointer(at)))
                }
                Ok(actual) => Verdict::fail(format!(
                    "expected {} to equal {value}, found {actual}",
                    display_pointer(at)
                )),
                Err(message) => Verdict::fail(message),
            },
            Self::EmptyBody => match body {
                ResponseBody::Empty => Verdict::pass("body is empty"),
                ResponseBody::Json(value) => {
                    Verdict::fail(format!("expected an empty body, found {value}"))
                }
                ResponseBody::Unparseable(text) => {
                    Verdict::fail(format!("expected an empty body, found {} byte(s)", text.len()))
                }
            },
            Self::TimeoutExpected => Verdict::fail(format!(
                "expected a timeout but the response arrived with status {status}"
            )),
        }
    }
}

fn check_keys(value: &Value, keys: &[String], at: &str) -> Verdict {
    let Value::Object(map) = value else {
        return Verdict::fail(format!(
            "cannot check keys at {}: found {}, not a mapping",
            display_pointer(at),
            describe(value)
        ));
    };
    let missing: Vec<&str> = keys
        .iter()
        .filter(|key| !map.contains_key(key.as_str()))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        Verdict::pass(format!("keys present at {}", display_pointer(at)))
    } else {
        Verdict::fail(format!(
            "missing key(s) at {}: {}",
            display_pointer(at),
            missing.join(", ")
        ))
    }
}

pub(super) fn locate<'a>(body: &'a ResponseBody, at: &str) -> Result<&'a Value, String> {
    let root = match body {
        ResponseBody::Json(value) => value,
        ResponseBody::Empty => return Err("response body is empty".to_string()),
        ResponseBody::Unparseable(_) => return Err("response body is not valid JSON".to_string()),
    };
    root.pointer(at)
        .ok_or_else(|| format!("nothing found at {}", display_pointer(at)))
}

pub(super) fn display_pointer(at: &str) -> String {
    if at.is_empty() {
        "the body root".to_string()
    } else {
        format!("'{at}'")
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

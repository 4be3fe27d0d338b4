use std::{error::Error as _, time::Duration, time::Instant};

use reqwest::{redirect, Client};
use tracing::debug;

use crate::config::{merge_headers, HarnessConfig};
use crate::error::{HarnessError, Result};

use super::models::{InvocationRequest, InvocationResult, Outcome, ResponseBody};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Sends one request per call and normalizes whatever comes back.
///
/// The client never retries and never follows redirects; a scenario sees
/// exactly one round trip, and a 3xx comes back as the completed status.
#[derive(Debug, Clone)]
pub struct Invoker {
    client: Client,
    default_timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl Invoker {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(HarnessError::Client)?;
        Ok(Self {
            client,
            default_timeout: config.request_timeout,
            default_headers: config.default_headers.clone(),
        })
    }

    pub async fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        if timeout.is_zero() {
            return Err(HarnessError::InvalidTimeout);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .timeout(timeout);

        for (name, value) in merge_headers(&request.headers, &self.default_headers) {
            builder = builder.header(name, value);
        }
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let outcome = match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(bytes) => Outcome::Completed {
                        status,
                        body: ResponseBody::from_bytes(&bytes),
                    },
                    Err(err) => classify_error(&err),
                }
            }
            Err(err) => classify_error(&err),
        };
        let result = InvocationResult {
            method: request.method.clone(),
            url: request.url.clone(),
            outcome,
            elapsed: start.elapsed(),
        };

        debug!(
            method = %result.method,
            url = %result.url,
            outcome = result.outcome.kind(),
            status = ?result.status(),
            elapsed_ms = result.elapsed.as_secs_f64() * 1000.0,
            "invocation finished"
        );

        Ok(result)
    }
}

fn classify_error(err: &reqwest::Error) -> Outcome {
    if err.is_timeout() {
        Outcome::TimedOut
    } else {
        Outcome::TransportError(describe_error(err))
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

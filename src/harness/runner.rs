use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::config::HarnessSettings;

use super::{
    models::{HarnessState, TestCase, TestOutcome},
    printer,
};

/// HTTP side of the harness. Holds no per-run state; that lives in [`HarnessState`].
pub struct ApiHarness {
    client: Client,
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl ApiHarness {
    pub fn new(settings: &HarnessSettings) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout,
            default_headers: settings.default_headers.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        compose_url(&self.base_url, path)
    }

    /// Sends one request, compares the status and logs the result. Never fails:
    /// transport errors become a failed test with an empty body.
    pub async fn execute(&self, state: &mut HarnessState, case: TestCase) -> TestOutcome {
        let url = self.url_for(&case.path);
        printer::print_test_start(&case.name, &url);

        let headers = compose_headers(state.token(), &self.default_headers, &case.headers);
        let mut request = self
            .client
            .request(case.method.to_reqwest(), &url)
            .timeout(self.timeout);
        for (name, value) in &headers {
            request = request.header(name, value);
        }
        if case.method.sends_body() {
            if let Some(body) = &case.body {
                request = request.body(body.to_string());
            }
        }

        tracing::debug!(method = %case.method, %url, "sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return transport_failure(state, &case.name, &err),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => parse_body(&text),
            Err(err) => return transport_failure(state, &case.name, &err),
        };

        let passed = status == case.expected_status;
        if passed {
            record(state, &case.name, true, "");
            printer::print_status(status);
        } else {
            record(
                state,
                &case.name,
                false,
                format!("Expected {}, got {}", case.expected_status, status),
            );
            printer::print_status(status);
            printer::print_response(&body);
        }

        TestOutcome {
            passed,
            status: Some(status),
            body,
        }
    }
}

/// Logs a result into `state` and echoes it to the console.
pub fn record(state: &mut HarnessState, name: &str, success: bool, details: impl Into<String>) {
    let details = details.into();
    printer::print_logged(name, success, &details);
    state.log_test(name, success, details);
}

fn transport_failure(state: &mut HarnessState, name: &str, err: &reqwest::Error) -> TestOutcome {
    tracing::warn!(test = name, error = %err, "request failed");
    let message = format!("Error: {err}");
    record(state, name, false, message.clone());
    printer::print_error(&message);
    TestOutcome {
        passed: false,
        status: None,
        body: Value::Object(Map::new()),
    }
}

pub fn compose_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// JSON content type and bearer token first, then profile defaults, then
/// per-test headers. Later entries replace earlier ones with the same
/// (case-insensitive) name.
pub fn compose_headers(
    token: Option<&str>,
    defaults: &[(String, String)],
    extras: &[(String, String)],
) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    if let Some(token) = token {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    for (name, value) in defaults.iter().chain(extras) {
        match headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => headers.push((name.clone(), value.clone())),
        }
    }
    headers
}

pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "text": text }))
}

use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Only POST and PUT carry a JSON body.
    pub fn sends_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request plus the status it is expected to produce.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub expected_status: u16,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        expected_status: u16,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            expected_status,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(name: impl Into<String>, path: impl Into<String>, expected_status: u16) -> Self {
        Self::new(name, HttpMethod::Get, path, expected_status)
    }

    pub fn post(name: impl Into<String>, path: impl Into<String>, expected_status: u16) -> Self {
        Self::new(name, HttpMethod::Post, path, expected_status)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// What a single test produced. `body` is always present, even on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub passed: bool,
    pub status: Option<u16>,
    pub body: Value,
}

impl TestOutcome {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub details: String,
}

/// Per-run mutable state: the bearer token and the test ledger.
#[derive(Debug, Clone, Default)]
pub struct HarnessState {
    token: Option<String>,
    tests_run: usize,
    tests_passed: usize,
    results: Vec<TestResult>,
}

impl HarnessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Appends a result. The only way the counters move.
    pub fn log_test(&mut self, name: impl Into<String>, success: bool, details: impl Into<String>) {
        self.tests_run += 1;
        if success {
            self.tests_passed += 1;
        }
        self.results.push(TestResult {
            name: name.into(),
            success,
            details: details.into(),
        });
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn tests_passed(&self) -> usize {
        self.tests_passed
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|result| !result.success)
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }

    /// Percentage of passed tests; 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.tests_run == 0 {
            0.0
        } else {
            self.tests_passed as f64 / self.tests_run as f64 * 100.0
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_test_keeps_counters_consistent() {
        let mut state = HarnessState::new();
        state.log_test("first", true, "");
        state.log_test("second", false, "Expected 200, got 500");
        state.log_test("third", true, "");

        assert_eq!(state.tests_run(), 3);
        assert_eq!(state.tests_passed(), 2);
        assert!(state.tests_passed() <= state.tests_run());
        assert!(!state.all_passed());
        assert_eq!(state.exit_code(), 1);

        let failed: Vec<_> = state.failures().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, vec!["second"]);
        assert_eq!(state.results()[1].details, "Expected 200, got 500");
    }

    #[test]
    fn success_rate_handles_empty_runs() {
        let mut state = HarnessState::new();
        assert_eq!(state.success_rate(), 0.0);
        assert_eq!(state.exit_code(), 0);

        state.log_test("a", true, "");
        state.log_test("b", false, "boom");
        assert!((state.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn token_can_be_replaced_and_cleared() {
        let mut state = HarnessState::new();
        assert_eq!(state.token(), None);
        state.set_token("abc");
        state.set_token("def");
        assert_eq!(state.token(), Some("def"));
        state.clear_token();
        assert_eq!(state.token(), None);
    }

    #[test]
    fn test_case_builder_collects_body_and_headers() {
        let case = TestCase::post("Login", "api/auth/login", 200)
            .json(json!({"email": "a@b.c"}))
            .header("X-Trace", "1");

        assert_eq!(case.method, HttpMethod::Post);
        assert_eq!(case.expected_status, 200);
        assert_eq!(case.body, Some(json!({"email": "a@b.c"})));
        assert_eq!(case.headers, vec![("X-Trace".to_string(), "1".to_string())]);
        assert!(case.method.sends_body());
        assert!(!HttpMethod::Delete.sends_body());
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }
}

//! Black-box smoke test for the marketplace REST API.

mod models;
mod printer;
mod report;
mod runner;
mod scenarios;

pub use models::{HarnessState, HttpMethod, TestCase, TestOutcome, TestResult};
pub use printer::{print_summary, render_summary};
pub use report::{write_report, RunReport};
pub use runner::{compose_headers, compose_url, parse_body, record, ApiHarness};
pub use scenarios::{
    create_listing, health_check, invalid_endpoints, list_listings, login, register_user,
    registration_payload, run_all, sample_listing, NegativeChecks, Role, HEALTH_MESSAGE,
    MALFORMED_ID_STATUS,
};

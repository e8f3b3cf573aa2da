#![allow(dead_code)]

use httpmock::prelude::*;
use serde_json::json;

pub const CUSTOMER_EMAIL: &str = "customer@example.com";
pub const OWNER_EMAIL: &str = "owner@example.com";

/// Mounts every endpoint the full scenario touches, answering as a healthy API.
pub fn mount_api(server: &MockServer, health_message: &str) {
    let message = health_message.to_string();
    server.mock(move |when, then| {
        when.method(GET).path("/api");
        then.status(200).json_body(json!({ "message": message }));
    });

    for (role, email, token) in [
        ("CUSTOMER", CUSTOMER_EMAIL, "customer-token"),
        ("OWNER", OWNER_EMAIL, "owner-token"),
    ] {
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/register")
                .body_contains(format!("\"role\":\"{role}\""));
            then.status(201).json_body(json!({
                "token": format!("{token}-registered"),
                "user": {"role": role, "email": email},
            }));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .body_contains(format!("\"email\":\"{email}\""));
            then.status(200).json_body(json!({
                "token": token,
                "user": {"role": role, "email": email},
            }));
        });
    }

    server.mock(|when, then| {
        when.method(GET).path("/api/listings");
        then.status(200)
            .json_body(json!({"count": 1, "listings": [{"title": "Seaside flat"}]}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/listings")
            .header("authorization", "Bearer owner-token");
        then.status(201).json_body(json!({"listing": {"title": "Test Property"}}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/nonexistent");
        then.status(404).body("Cannot GET /api/nonexistent");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/listings/invalid-id");
        then.status(500).json_body(json!({"message": "Server error"}));
    });
}

pub fn mount_healthy_api(server: &MockServer) {
    mount_api(server, "Rental Marketplace API is running");
}

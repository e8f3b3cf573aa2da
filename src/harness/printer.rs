use std::fmt;

use colored::{Color, Colorize};
use serde_json::Value;

use super::models::HarnessState;

const RULE_WIDTH: usize = 50;

pub fn print_banner(base_url: &str) {
    println!("{}", "Starting RentEase API tests".bold());
    println!("{} {}", "Target:".bold(), base_url.cyan());
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_section(title: &str) {
    println!("\n{}", title.bold().blue());
}

pub fn print_test_start(name: &str, url: &str) {
    println!("\n{} {}...", "Testing".bold(), name);
    println!("   URL: {}", url.cyan());
}

pub fn print_logged(name: &str, success: bool, details: &str) {
    if success {
        println!("{} {}", "PASS".green().bold(), name);
    } else if details.is_empty() {
        println!("{} {}", "FAIL".red().bold(), name);
    } else {
        println!("{} {} - {}", "FAIL".red().bold(), name, details.dimmed());
    }
}

pub fn print_status(status: u16) {
    println!("   Status: {}", status.to_string().color(status_color(status)));
}

pub fn print_response(body: &Value) {
    println!("   Response: {}", body.to_string().dimmed());
}

pub fn print_error(message: &str) {
    println!("   {}", message.red());
}

/// An observation inside a scenario that is not itself a logged test.
pub fn print_note(ok: bool, message: &str) {
    let marker = if ok { "ok".green() } else { "!!".red() };
    println!("   {} {}", marker, message);
}

pub fn print_summary(state: &HarnessState) {
    print!("{}", render_summary(state));
}

pub fn render_summary(state: &HarnessState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, state);
    out
}

fn write_summary(out: &mut impl fmt::Write, state: &HarnessState) -> fmt::Result {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", "TEST SUMMARY".bold())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Tests Run: {}", state.tests_run())?;
    writeln!(out, "Tests Passed: {}", state.tests_passed())?;
    writeln!(out, "Success Rate: {:.1}%", state.success_rate())?;

    if state.all_passed() {
        return writeln!(out, "{}", "ALL TESTS PASSED!".green().bold());
    }

    writeln!(out, "{}", "SOME TESTS FAILED!".red().bold())?;
    writeln!(out, "\nFailed Tests:")?;
    for result in state.failures() {
        writeln!(out, "  - {}: {}", result.name, result.details)?;
    }
    Ok(())
}

fn status_color(status: u16) -> Color {
    if status >= 400 {
        Color::Red
    } else if status >= 300 {
        Color::Yellow
    } else {
        Color::Green
    }
}

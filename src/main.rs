use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rentease::config::{load_config, HarnessSettings, SettingsOverrides};
use rentease::harness::{print_summary, run_all, write_report, ApiHarness, HarnessState, RunReport};

#[derive(Parser, Debug)]
#[command(
    name = "rentease-api-check",
    version,
    about = "Smoke-test the RentEase REST API and report pass/fail"
)]
struct Cli {
    /// Base URL of the API under test
    #[arg(short = 'u', long, env = "RENTEASE_API_URL")]
    base_url: Option<String>,

    /// Select a profile from rentease.json
    #[arg(short = 'P', long)]
    profile: Option<String>,

    /// Directory or file containing rentease.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Password used for the generated test accounts
    #[arg(long, env = "RENTEASE_TEST_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Write a JSON report of every test to this path
    #[arg(short, long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    rentease::telemetry::init("warn");

    let cwd = std::env::current_dir()?;
    let config_target = cli
        .config
        .as_ref()
        .map(|p| resolve_relative(&cwd, p))
        .unwrap_or_else(|| cwd.clone());
    let config = load_config(&config_target).context("loading configuration")?;

    let settings = HarnessSettings::resolve(
        config.as_ref(),
        cli.profile.as_deref(),
        SettingsOverrides {
            base_url: cli.base_url,
            timeout_secs: cli.timeout,
            password: cli.password,
        },
    )?;
    tracing::debug!(
        base_url = %settings.base_url,
        profile = settings.profile_name.as_deref().unwrap_or("<none>"),
        "resolved harness settings"
    );

    let harness = ApiHarness::new(&settings)?;
    let mut state = HarnessState::new();
    run_all(&harness, &mut state, &settings.password).await;
    print_summary(&state);

    if let Some(report) = &cli.report {
        let path = resolve_relative(&cwd, report);
        write_report(&path, &RunReport::new(harness.base_url(), &state))?;
        println!("Report written to {}", path.display());
    }

    Ok(ExitCode::from(state.exit_code()))
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

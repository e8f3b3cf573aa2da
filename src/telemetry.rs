use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `rentease=trace`).
pub const LOG_ENV: &str = "RENTEASE_LOG";

/// Installs a stderr fmt subscriber. Stdout stays reserved for program output.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

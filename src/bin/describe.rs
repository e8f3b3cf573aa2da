use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use rentease::env::{load_env_file, lookup, EnvMap};
use rentease::generator::{
    generate_description, parse_prompt_arg, ChatClient, GenerationResult, GeneratorError,
    GeneratorSettings,
};

#[derive(Parser, Debug)]
#[command(
    name = "rentease-describe",
    version,
    about = "Generate a listing description and print it as one JSON line"
)]
struct Cli {
    /// JSON object with optional title, type, location, price and facilities
    #[arg(value_name = "PROMPT_JSON", allow_hyphen_values = true)]
    prompt: Option<String>,

    /// Dotenv file consulted before the process environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Anything after the prompt is ignored
    #[arg(hide = true, num_args = 0..)]
    extra: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_informational(&err) => err.exit(),
        Err(err) => {
            println!("{}", argument_error(&err).to_json_line());
            return;
        }
    };
    rentease::telemetry::init("warn");
    if !cli.extra.is_empty() {
        tracing::debug!(ignored = ?cli.extra, "ignoring extra arguments");
    }

    let result = run(cli).await;
    println!("{}", result.to_json_line());
}

fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Argument errors still honour the one-JSON-line contract.
fn argument_error(err: &clap::Error) -> GenerationResult {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let message = first.strip_prefix("error: ").unwrap_or(first).trim();
    GenerationResult::failure(format!("Invalid arguments: {message}"))
}

async fn run(cli: Cli) -> GenerationResult {
    let data = match parse_prompt_arg(cli.prompt.as_deref()) {
        Ok(data) => data,
        Err(err) => return err.into(),
    };

    let mut env = EnvMap::new();
    if let Some(path) = &cli.env_file {
        if let Err(err) = load_env_file(path, &mut env) {
            return GeneratorError::Config(format!("{err:#}")).into();
        }
    }

    let settings = match GeneratorSettings::from_lookup(|key| lookup(key, &env)) {
        Ok(settings) => settings,
        Err(err) => return err.into(),
    };

    let client = ChatClient::new(settings);
    generate_description(&client, &data).await
}

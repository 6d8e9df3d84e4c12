use clap::{Arg, ArgAction, ArgMatches, Command};
use podman_ai::config::Config;
use podman_ai::exit_codes;
use podman_ai::pipeline::Pipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("podman-ai")
        .about("Turn plain language into a podman command and run it")
        .long_about(
            "podman-ai asks a local Ollama model for a single podman command matching your request, \
             retries once with `podman help` as context if the answer is unusable, asks for \
             confirmation before anything destructive, then runs it",
        )
        .arg(Arg::new("query")
            .help("What you want podman to do, in plain language")
            .num_args(1..)
            .trailing_var_arg(true))
        .arg(Arg::new("config")
            .long("config")
            .help("Path to the TOML configuration file")
            .value_name("PATH")
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("show-config")
            .long("show-config")
            .help("Show configuration information")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Log pipeline progress to stderr")
            .action(ArgAction::SetTrue))
}

/// Diagnostics go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures.
            return ExitCode::from(if e.use_stderr() { exit_codes::FAILED } else { exit_codes::OK });
        }
    };

    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::FAILED)
        }
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<u8> {
    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);

    if matches.get_flag("show-config") {
        if let Err(e) = Config::show_config_info(config_path) {
            eprintln!("Error: {:#}", e);
            return Ok(exit_codes::CONFIG);
        }
        return Ok(exit_codes::OK);
    }

    let query_args: Vec<String> = matches
        .get_many::<String>("query")
        .unwrap_or_default()
        .map(|s| s.to_string())
        .collect();

    let request = query_args.join(" ");
    if request.trim().is_empty() {
        eprintln!("Usage: podman-ai <query>");
        return Ok(exit_codes::FAILED);
    }

    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            eprintln!("Error: {:#}", e);
            return Ok(exit_codes::CONFIG);
        }
    };

    info!("Processing request: {}", request);

    let pipeline = Pipeline::from_config(&config);
    let outcome = pipeline.process_request(&request).await?;

    Ok(outcome.exit_code())
}

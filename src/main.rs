//! vcactl - Main entry point

use clap::{CommandFactory, Parser};
use log::debug;

use vcactl::config::defaults;
use vcactl::{run_command, Cli, HttpConnector, Output, OutputMode};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        defaults::DEBUG_LOG_LEVEL
    } else {
        defaults::LOG_LEVEL
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if cli.version {
        println!("vcactl version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let Some(command) = &cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    debug!("Starting vcactl v{}: {:?}", env!("CARGO_PKG_VERSION"), command);
    let output = Output::new(OutputMode::from_flags(cli.json, cli.xml));
    if cli.insecure {
        output.warning(
            "InsecureRequestWarning: Unverified HTTPS request is being made. \
             Adding certificate verification is strongly advised.",
        );
    }

    let connector = HttpConnector::new(cli.insecure);
    if let Err(e) = run_command(&cli, command, &connector).await {
        debug!("Command failed: {:?}", e);
        output.error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

use env_logger::Env;
use log::{error, info};
use qso_trigger::cli;
use qso_trigger::client::McpClient;
use qso_trigger::config::ClientConfig;
use qso_trigger::errors::AppError;
use qso_trigger::runner::{self, Outcome};
use qso_trigger::transport::HttpTransport;
use std::io;
use std::process::ExitCode;

fn setup_logging(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", match level {
        "essential" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    });
    env_logger::Builder::from_env(env).init();
}

fn run(args: &cli::CliArgs, config: ClientConfig) -> Result<Outcome, AppError> {
    let mode = args.mode()?;
    let client = McpClient::new(HttpTransport::new(), config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner::run(&client, &mode, &mut out)
}

fn main() -> ExitCode {
    let args = match cli::parse_with(std::env::args().collect(), &mut io::stdout(), &mut io::stderr()) {
        Ok(args) => args,
        Err(code) => return ExitCode::from(cli::parse_exit_status(code)),
    };
    setup_logging(&args.log_level);

    let config = ClientConfig::default();
    info!("Using MCP server at {}", config.base_url);

    match run(&args, config.clone()) {
        Ok(outcome) => {
            info!("Done (exit {})", outcome.exit_status());
            ExitCode::from(outcome.exit_status())
        }
        Err(e) => {
            error!("run failed: {}", e);
            eprintln!("{}", runner::failure_message(&e, &config));
            ExitCode::from(1)
        }
    }
}

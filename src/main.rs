mod config;
mod constants;
mod error;
mod job;
mod mailer;
mod models;
mod roster;
mod services;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, error, info};

use crate::{
    config::Config,
    constants::LOG_DIRECTIVE,
    job::{ExitOutcome, JobRunner},
    mailer::SmtpMailer,
    utils::message_formatter::MessageTemplate,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Credentials are checked before the roster is touched
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // A path argument takes precedence over ROSTER_PATH
    let roster_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.roster_path.clone());

    let mailer = SmtpMailer::new(config.smtp.clone(), config.credentials.clone());
    let mut runner = JobRunner::new(&mailer, MessageTemplate::birthday(config.company_name));

    let outcome = runner.run(&roster_path).await;
    debug!("Runner stopped in state {}", runner.state());

    // Fatal errors were already reported by the runner
    if let ExitOutcome::Completed(summary) = &outcome {
        let sent = summary.report.as_ref().map_or(0, |r| r.sent_count());
        info!(
            "Run finished: {} record(s) loaded, {} birthday(s) today, {} email(s) sent",
            summary.loaded, summary.matched, sent
        );
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

//! estoque-db - Main entry point.
//!
//! Opens one connection to the inventory database, reports whether it worked
//! and exits.

use estoque_db::Bootstrapper;
use estoque_db::bootstrap::{EXIT_INVALID_CONFIG, OPERATOR_HINT};
use estoque_db::config::Config;
use estoque_db::db::ConnectionFactory;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    if config.enable_logs {
        init_tracing(&config);
    }

    info!("Starting estoque-db v{}", env!("CARGO_PKG_VERSION"));

    let params = match config.connection_parameters() {
        Ok(params) => params,
        Err(e) => {
            error!(error = %e, "Configuration rejected");
            eprintln!("{}", e);
            eprintln!("{}", OPERATOR_HINT);
            return ExitCode::from(EXIT_INVALID_CONFIG);
        }
    };

    let bootstrapper = Bootstrapper::new(ConnectionFactory::mysql(params));

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    match bootstrapper.run(&mut stdout, &mut stderr).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code(config.always_exit_zero)),
        Err(e) => {
            // Nowhere left to report to but the log.
            error!(error = %e, "Failed to write to the terminal");
            ExitCode::FAILURE
        }
    }
}

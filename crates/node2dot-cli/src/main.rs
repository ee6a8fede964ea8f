use std::process::ExitCode;
use std::time::Instant;

use node2dot::{Node2DotOptions, PROGNAME, parse_args, run_main};
use node2dot_error::ErrorKind;

pub fn main() -> ExitCode {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = match parse_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{PROGNAME}: {}", e.message());
            eprintln!("{PROGNAME}: try '--help' for more information");
            tracing::error!(error = %e, "invalid arguments");
            return ExitCode::from(2);
        }
    };

    let opts = Node2DotOptions::from(cli);
    for line in opts.announcements() {
        eprintln!("{PROGNAME}:{line}");
    }

    let code = match run_main(&opts) {
        Ok(summary) => {
            tracing::info!(nodes = summary.nodes, edges = summary.edges, "converted");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{PROGNAME}: {e}");
            tracing::error!(kind = e.kind().as_str(), error = ?e, "execution failed");
            match e.kind() {
                ErrorKind::InvalidArgument | ErrorKind::ConfigInvalid => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    };

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    code
}

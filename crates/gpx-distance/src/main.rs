use gpx_distance::{log_version_info, run};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Setup logging; stdout is reserved for the result line and usage text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    log_version_info();

    match run(std::env::args_os(), &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_usage() {
                tracing::error!("{e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

//! Creates the SkillSync tables if they do not exist yet.
//!
//! Exit status 0 on success (including when everything already existed),
//! 1 when table creation or the follow-up verification fails.

use std::process::ExitCode;

use skillsync_api::config::Config;
use skillsync_api::db::init::run;
use skillsync_api::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(&config.rust_log, env!("CARGO_CRATE_NAME"));

    match run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

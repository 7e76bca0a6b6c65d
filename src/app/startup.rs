//! Application startup: configuration, logging and the script session

use crate::app::cli::{Args, FileConfig, Settings};
use crate::app::error::AppError;
use crate::app::session::Session;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::version;
use crate::queue::api::QueuePoolManager;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::BufReader;

/// Exit code used when the session is interrupted by a signal
const EXIT_INTERRUPTED: i32 = 130;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let args = Args::parse();

    // Logging is not up yet, so configuration problems go straight to stderr
    let file_config = match FileConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let settings = match Settings::resolve(&args, &file_config, std::io::stdout().is_terminal()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let log_file = settings
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format,
        log_file.as_deref(),
        settings.color,
    ) {
        eprintln!("Error: {}", AppError::Logging(e.to_string()));
        return 1;
    }

    log::info!("handoffq {} starting", version::version_line());
    log::debug!("Effective settings: {:?}", settings);

    let pool = Arc::new(QueuePoolManager::new(settings.pool.clone()));
    let mut session = Session::new(Arc::clone(&pool), settings.color);

    tokio::select! {
        result = run_session(&mut session, &settings) => match result {
            Ok(executed) => {
                log::info!("Executed {} command(s)", executed);
                0
            }
            Err(e) => {
                log_error_with_context(&e, "Running queue script");
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, destroying {} queue(s)", pool.len());
            pool.clear();
            EXIT_INTERRUPTED
        }
    }
}

async fn run_session(session: &mut Session, settings: &Settings) -> Result<usize, AppError> {
    let mut stdout = std::io::stdout();
    let executed = match &settings.script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            session.run(BufReader::new(file), &mut stdout).await?
        }
        None => {
            session
                .run(BufReader::new(tokio::io::stdin()), &mut stdout)
                .await?
        }
    };
    session.pool().clear();
    Ok(executed)
}

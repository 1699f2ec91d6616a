//! rexscan - regex match iteration with explicit cursor boundaries
//!
//! Command-line front end for `scan`, `replace` and `split`.

#[cfg(feature = "cli")]
mod cli;

use std::process::ExitCode;

#[cfg(feature = "cli")]
const REXSCAN_DEBUG_LOG: &str = "REXSCAN_DEBUG_LOG";
#[cfg(feature = "cli")]
const REXSCAN_DEBUG_LOG_STYLE: &str = "REXSCAN_DEBUG_LOG_STYLE";

#[cfg(feature = "cli")]
fn init_logging() {
    use env_logger as logger;

    if std::env::var(REXSCAN_DEBUG_LOG).is_ok() {
        logger::Builder::from_env(
            logger::Env::new()
                .filter(REXSCAN_DEBUG_LOG)
                .write_style(REXSCAN_DEBUG_LOG_STYLE),
        )
        .format_timestamp_micros()
        .init();
        log::debug!("logging initialized");
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init()
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    {
        use cli::{parse, Commands};

        init_logging();
        let args = parse();

        // If no command, show help
        let Some(command) = args.command else {
            eprintln!("rexscan: regex match iteration with explicit cursor boundaries");
            eprintln!();
            eprintln!("Usage: rexscan <COMMAND>");
            eprintln!();
            eprintln!("Commands:");
            eprintln!("  scan     List every match with its cursor boundaries");
            eprintln!("  replace  Replace matches using a template");
            eprintln!("  split    Split input around matches");
            eprintln!();
            eprintln!("Options:");
            eprintln!("  -f, --format <FORMAT>  Output format [json|text] (default: json)");
            eprintln!("  -h, --help             Print help");
            eprintln!("  -V, --version          Print version");
            return ExitCode::SUCCESS;
        };

        let format = args.format;

        let result = match command {
            Commands::Scan {
                pattern,
                input,
                file,
                flags,
                max_matches,
                engine,
            } => cli::handle_scan(
                &pattern,
                input.as_deref(),
                file.as_deref(),
                &flags,
                max_matches,
                engine.as_deref(),
                format,
            ),

            Commands::Replace {
                pattern,
                replacement,
                input,
                file,
                flags,
                engine,
            } => cli::handle_replace(
                &pattern,
                &replacement,
                input.as_deref(),
                file.as_deref(),
                &flags,
                engine.as_deref(),
                format,
            ),

            Commands::Split {
                pattern,
                input,
                file,
                flags,
                limit,
                engine,
            } => cli::handle_split(
                &pattern,
                input.as_deref(),
                file.as_deref(),
                &flags,
                limit,
                engine.as_deref(),
                format,
            ),
        };

        match result {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::debug!("command failed: {}", e);
                let error = rexscan::output::ErrorResponse::new(
                    rexscan::output::error_codes::COMMAND_ERROR,
                    &e,
                );
                eprintln!("{}", rexscan::output::json::format_json_compact(&error));
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("CLI feature not enabled. Build with --features cli");
        ExitCode::FAILURE
    }
}

mod cli;
mod commands;
mod config;
mod ui;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // The HTTP client's own connection chatter only shows at the highest level
    let http_level = if cli.verbose >= 3 {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .filter_module("ureq", http_level)
        .filter_module("ureq_proto", http_level)
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match commands::sync::run(&ctx, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            if let Some(err) = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<marathonkit::Error>())
            {
                ui::hint(err.category().advice());
            }
            ExitCode::FAILURE
        }
    }
}

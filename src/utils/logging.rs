use log::{info, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Set up the global logger.
///
/// `to_terminal` is false while the TUI owns the screen; only the file
/// logger is installed then.
pub fn init_logging(
    log_file: Option<&Path>,
    verbose: bool,
    to_terminal: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = Vec::new();
    if to_terminal {
        loggers.push(TermLogger::new(
            log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
            }
            Err(e) => {
                eprintln!("Failed to create log file: {}", e);
            }
        }
    }

    if loggers.is_empty() {
        return Ok(());
    }
    CombinedLogger::init(loggers)?;

    info!("Logging initialized");
    if let Some(path) = log_file {
        info!("Logging to file: {:?}", path);
    }
    Ok(())
}

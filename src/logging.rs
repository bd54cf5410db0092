use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::config::Config;

/// Install the process logger: stderr always, plus the configured log file.
///
/// Best-effort: an unopenable log file is reported and skipped, and a logger
/// that is already installed is left in place.
pub fn init(config: &Config, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug.max(config.logging.level.to_filter())
    } else {
        config.logging.level.to_filter()
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = config.log_file() {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(level, simplelog::Config::default(), file)),
            Err(e) => eprintln!("shcompose: cannot open log file {}: {e}", path.display()),
        }
    }

    let _ = CombinedLogger::init(loggers);
}

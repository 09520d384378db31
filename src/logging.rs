use crate::error::{Error, Result};
use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

/// Appends `timestamp [LEVEL] target: message` lines to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl Logger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(
                file,
                "{} [{}] {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs the global logger: the file logger when `log_file` is set,
/// otherwise `env_logger` on stderr honoring `RUST_LOG`.
pub fn init(debug: bool, log_file: Option<&str>) -> Result<()> {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Info };

    match log_file {
        Some(path) => {
            let logger = Logger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))
                .map_err(|e| Error::Internal(format!("logger already set: {}", e)))?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.as_str().to_lowercase()),
            )
            .try_init()
            .map_err(|e| Error::Internal(format!("logger already set: {}", e)))?;
        }
    }

    Ok(())
}

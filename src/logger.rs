//! Logger setup for pipeline scripts using these helpers

use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

/// Log level, optionally prefixed with `json:` for structured output
pub const LOG_LEVEL_ENV: &str = "PACKAGING_LOG_LEVEL";
/// File that JSON log lines are appended to instead of stderr
pub const LOG_PATH_ENV: &str = "PACKAGING_LOG_PATH";

/// JSON logger implementation
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<std::fs::File>>,
}

/// Split a level spec such as `debug`, `json` or `json:warn` into
/// (use_json, level filter). Unknown levels fall back to info.
pub fn parse_level_spec(spec: &str) -> (bool, LevelFilter) {
    let (use_json, level) = if let Some(stripped) = spec.strip_prefix("json:") {
        (true, stripped)
    } else if spec == "json" {
        (true, "info")
    } else {
        (false, spec)
    };

    let filter = match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    };

    (use_json, filter)
}

impl JsonLogger {
    /// Create a new JSON logger
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file = log_path
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Install a global logger for the given level spec
    pub fn init_with_level(spec: &str) {
        let (use_json, filter) = parse_level_spec(spec);

        if !use_json {
            let result = env_logger::Builder::new()
                .filter_level(filter)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();
            if let Err(e) = result {
                eprintln!("Failed to initialize logger: {e}");
            }
            return;
        }

        // JSON mode with logging switched off installs nothing
        let Some(level) = filter.to_level() else {
            log::set_max_level(LevelFilter::Off);
            return;
        };

        let logger = Box::new(JsonLogger::new(level, env::var(LOG_PATH_ENV).ok()));
        if let Err(e) = log::set_boxed_logger(logger) {
            eprintln!("Failed to initialize JSON logger: {e}");
            return;
        }
        log::set_max_level(filter);
    }

    /// Initialize from `PACKAGING_LOG_LEVEL`, defaulting to info
    pub fn init() {
        let spec = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
        Self::init_with_level(&spec);
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
                return;
            }
        }
        let _ = io::stderr().write_all(line.as_bytes());
        let _ = io::stderr().flush();
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
            "@file": record.file().unwrap_or("unknown"),
            "@line": record.line().unwrap_or(0),
        });

        self.write_line(&format!(
            "{}\n",
            serde_json::to_string(&entry).unwrap_or_default()
        ));
    }

    fn flush(&self) {
        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

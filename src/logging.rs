use std::error::Error;
use std::path::{Path, PathBuf};
use chrono::Utc;
use log::{debug, error, info};
use env_logger::{Builder, Target};

pub const LOG_LEVEL_VAR: &str = "DIPEPTIDE_LOG_LEVEL";

/// Directory holding log files, `~/.dipeptide-explorer/logs`
pub fn log_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dipeptide-explorer")
        .join("logs")
}

/// Initialize file logging. The terminal belongs to the UI, so nothing is written to stderr.
pub fn init_logging() -> Result<PathBuf, Box<dyn Error>> {
    init_logging_in(&log_directory())
}

pub fn init_logging_in(log_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;

    let log_file = log_dir.join(format!("dipeptide_{}.log", Utc::now().format("%Y%m%d_%H%M%S")));

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(std::fs::File::create(&log_file)?)))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf,
                "{} [{}] [{}:{}] [{}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                std::thread::current().name().unwrap_or("main"),
                record.args()
            )
        })
        .try_init()?;

    info!("Logging system initialized");
    info!("Log file: {log_file:?}");
    debug!("Log directory: {log_dir:?}");

    Ok(log_file)
}

/// Map a user-facing level name onto a `RUST_LOG` filter, defaulting to `info`.
pub fn resolve_log_filter(level: Option<&str>) -> String {
    let level = level.unwrap_or("info").trim().to_lowercase();

    let env_filter = match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => level.as_str(),
        _ => {
            eprintln!("Invalid log level '{level}', defaulting to 'info'");
            "info"
        }
    };

    format!("dipeptide_explorer={env_filter}")
}

/// Set logging level based on environment variable or default
pub fn set_log_level() {
    let level = std::env::var(LOG_LEVEL_VAR).ok();
    std::env::set_var("RUST_LOG", resolve_log_filter(level.as_deref()));
}

/// Log system information at startup
pub fn log_system_info() {
    info!("=== Dipeptide Mass Explorer Starting ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Build target: {}", std::env::consts::ARCH);
    info!("Operating system: {}", std::env::consts::OS);
    info!("Current working directory: {:?}", std::env::current_dir().unwrap_or_default());
    info!("Available CPU cores: {}", num_cpus::get());

    debug!("Environment variables:");
    for (key, value) in std::env::vars() {
        if key.ends_with("API_KEY") {
            debug!("  {key}: <set>");
        } else if key.starts_with("DIPEPTIDE_") || key == "RUST_LOG" {
            debug!("  {key}: {value}");
        }
    }
}

/// Log application shutdown
pub fn log_shutdown() {
    info!("=== Dipeptide Mass Explorer Shutting Down ===");
    info!("Application terminated at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}

/// Log a critical error and mirror it to stderr
pub fn log_critical_error(error: &str, context: Option<&str>) {
    if let Some(ctx) = context {
        error!("CRITICAL ERROR [{ctx}]: {error}");
        eprintln!("[{}] CRITICAL ERROR [{}]: {}",
                 Utc::now().format("%Y-%m-%d %H:%M:%S UTC"), ctx, error);
    } else {
        error!("CRITICAL ERROR: {error}");
        eprintln!("[{}] CRITICAL ERROR: {}",
                 Utc::now().format("%Y-%m-%d %H:%M:%S UTC"), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_initialization() {
        let temp_dir = tempdir().unwrap();

        let result = init_logging_in(temp_dir.path());
        assert!(result.is_ok());

        let log_file = result.unwrap();
        assert!(log_file.exists());
        assert!(log_file.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_resolve_log_filter() {
        assert_eq!(resolve_log_filter(None), "dipeptide_explorer=info");
        assert_eq!(resolve_log_filter(Some("DEBUG")), "dipeptide_explorer=debug");
        assert_eq!(resolve_log_filter(Some("loud")), "dipeptide_explorer=info");
    }
}

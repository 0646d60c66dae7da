//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `POROHERALD_DISCORD_TOKEN`: bot token
//! - `POROHERALD_CHANNEL_ID`: output channel snowflake
//! - `POROHERALD_DATA_DIR`: directory holding calendars and persisted state
//! - `POROHERALD_DUE_WINDOW_SECS`: optional trigger window override
//!
//! ## File Locations
//! The loader probes `config.json`/`config.toml` and
//! `poroherald.json`/`poroherald.toml` in the working directory, its parents
//! and next to the executable.

use std::path::{Path, PathBuf};

use poroherald_domain::{
    AppConfig, DataSettings, DiscordSettings, HeraldError, ReminderSettings, Result,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `HeraldError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<AppConfig> {
    let token = env_var("POROHERALD_DISCORD_TOKEN")?;
    let channel_id = env_var("POROHERALD_CHANNEL_ID")?;
    let data_dir = env_var("POROHERALD_DATA_DIR")?;

    let mut reminders = ReminderSettings::default();
    if let Ok(raw) = std::env::var("POROHERALD_DUE_WINDOW_SECS") {
        reminders.due_window_seconds = raw.parse::<u64>().map_err(|e| {
            HeraldError::Config(format!("Invalid due window override: {}", e))
        })?;
    }

    Ok(AppConfig {
        discord: DiscordSettings { token, channel_id },
        data: DataSettings { dir: PathBuf::from(data_dir) },
        reminders,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HeraldError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HeraldError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HeraldError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format is detected by extension.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HeraldError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HeraldError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HeraldError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("poroherald.json"),
            cwd.join("poroherald.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("poroherald.json"),
                exe_dir.join("poroherald.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| HeraldError::Config(format!("Missing required environment variable: {}", key)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: [&str; 4] = [
        "POROHERALD_DISCORD_TOKEN",
        "POROHERALD_CHANNEL_ID",
        "POROHERALD_DATA_DIR",
        "POROHERALD_DUE_WINDOW_SECS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("POROHERALD_DISCORD_TOKEN", "token-123");
        std::env::set_var("POROHERALD_CHANNEL_ID", "42");
        std::env::set_var("POROHERALD_DATA_DIR", "/tmp/poroherald");
        std::env::set_var("POROHERALD_DUE_WINDOW_SECS", "120");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.discord.token, "token-123");
        assert_eq!(config.discord.channel_id, "42");
        assert_eq!(config.data.dir, PathBuf::from("/tmp/poroherald"));
        assert_eq!(config.reminders.due_window_seconds, 120);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result.unwrap_err(), HeraldError::Config(_)));
    }

    #[test]
    fn test_load_from_env_invalid_window() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("POROHERALD_DISCORD_TOKEN", "t");
        std::env::set_var("POROHERALD_CHANNEL_ID", "42");
        std::env::set_var("POROHERALD_DATA_DIR", "/tmp/poroherald");
        std::env::set_var("POROHERALD_DUE_WINDOW_SECS", "not-a-number");

        let result = load_from_env();
        assert!(matches!(result.unwrap_err(), HeraldError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "discord": {"token": "t", "channel_id": "42"},
            "data": {"dir": "data"},
            "reminders": {"due_window_seconds": 90}
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from json");
        assert_eq!(config.discord.channel_id, "42");
        assert_eq!(config.reminders.due_window_seconds, 90);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[discord]
token = "t"
channel_id = "42"

[data]
dir = "data"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from toml");
        assert_eq!(config.discord.token, "t");
        // Absent reminder section falls back to the tick interval
        assert_eq!(config.reminders.due_window_seconds, 60);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result.unwrap_err(), HeraldError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("whatever", &PathBuf::from("config.yaml"));
        assert!(matches!(result.unwrap_err(), HeraldError::Config(_)));
    }
}

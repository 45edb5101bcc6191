use crate::errors::{RollcallError, RollcallResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for every backend call, without a trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Optional token granting mutations. The TUI can still be given one
    /// interactively; this is just the startup value.
    pub admin_token: Option<String>,
    pub log_level: String,
    /// Directory `rollcall.log` is written into. Older config files
    /// without the field fall back to the working directory.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_log_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 30,
            admin_token: None,
            log_level: "info".to_string(),
            log_dir: default_log_dir(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads `~/.config/rollcall/config.json`, creating it with defaults on
/// first run. `ROLLCALL_BASE_URL` and `ROLLCALL_ADMIN_TOKEN` (from the
/// environment or a `.env` file) override whatever the file says.
pub fn initialize_config() -> RollcallResult<()> {
    dotenv::dotenv().ok();

    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RollcallError::config_error(format!("failed to create config directory: {}", e))
            })?;
        }
        write_config(&config_path, &config)?;
        config
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;
    Ok(())
}

fn get_config_path() -> RollcallResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| RollcallError::config_error("could not determine home directory"))?;

    Ok(home_dir.join(".config").join("rollcall").join("config.json"))
}

fn load_config(path: &Path) -> RollcallResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| RollcallError::config_error(format!("failed to read config file: {}", e)))?;

    serde_json::from_str(&config_str)
        .map_err(|e| RollcallError::config_error(format!("failed to parse config: {}", e)))
}

fn write_config(path: &Path, config: &Config) -> RollcallResult<()> {
    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| RollcallError::config_error(format!("failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| RollcallError::config_error(format!("failed to write config file: {}", e)))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(base_url) = env::var("ROLLCALL_BASE_URL") {
        if !base_url.is_empty() {
            config.base_url = base_url;
        }
    }
    if let Ok(token) = env::var("ROLLCALL_ADMIN_TOKEN") {
        if !token.is_empty() {
            config.admin_token = Some(token);
        }
    }
}

fn validate_config(config: &Config) -> RollcallResult<()> {
    if config.base_url.is_empty() {
        return Err(RollcallError::config_error("base_url is required"));
    }

    if !config.base_url.starts_with("http") {
        return Err(RollcallError::config_error(
            "base_url must be an http(s) URL",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(RollcallError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.log_level.is_empty() {
        return Err(RollcallError::config_error("log_level is required"));
    }

    if config.log_dir.is_empty() {
        return Err(RollcallError::config_error("log_dir is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

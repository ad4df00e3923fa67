use crate::errors::{ParleyError, ParleyResult};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

/// Runtime configuration. Loaded from the config file when present,
/// otherwise written out with defaults; a handful of env vars override
/// individual fields so the client can be pointed at a backend without
/// editing the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub ai_name: String,
    pub ai_welcome: String,
    pub user_name: String,
    /// Interval between typing-animation frames, in milliseconds.
    pub typing_tick_ms: u64,
    /// Cosmetic pause before the AI placeholder appears. UX policy, not
    /// protocol: the backend is contacted after this delay regardless.
    pub reply_delay_ms: u64,
    /// Cosmetic pause shown while the transcript resets after a clear.
    pub clear_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            ai_name: "ShopAssist AI".to_string(),
            ai_welcome: "Hi there! I'm ShopAssist AI, your personal shopping assistant. \
                         How can I help you today?"
                .to_string(),
            user_name: "You".to_string(),
            typing_tick_ms: 500,
            reply_delay_ms: 500,
            clear_delay_ms: 800,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the config file, creating it with defaults on first run, then
    /// applies env overrides and validates the result.
    pub fn load() -> ParleyResult<Config> {
        let path = config_path()?;
        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                ParleyError::config_error(format!("failed to read config file: {e}"))
            })?;
            serde_json::from_str(&raw)
                .map_err(|e| ParleyError::config_error(format!("failed to parse config: {e}")))?
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    ParleyError::config_error(format!("failed to create config directory: {e}"))
                })?;
            }
            let raw = serde_json::to_string_pretty(&config)
                .map_err(|e| ParleyError::config_error(format!("failed to serialize config: {e}")))?;
            fs::write(&path, raw).map_err(|e| {
                ParleyError::config_error(format!("failed to write config file: {e}"))
            })?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Env names follow the backend's own `.env` convention.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CHAT_SERVER_URL") {
            self.server_url = url;
        }
        if let Ok(name) = env::var("AI_NAME") {
            self.ai_name = name;
        }
        if let Ok(welcome) = env::var("AI_WELCOME") {
            self.ai_welcome = welcome;
        }
        if let Ok(name) = env::var("CUSTOMER_NAME") {
            self.user_name = name;
        }
    }

    pub fn validate(&self) -> ParleyResult<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ParleyError::config_error(
                "server_url must start with http:// or https://",
            ));
        }
        if self.ai_name.trim().is_empty() {
            return Err(ParleyError::config_error("ai_name must not be empty"));
        }
        if self.user_name.trim().is_empty() {
            return Err(ParleyError::config_error("user_name must not be empty"));
        }
        if self.typing_tick_ms == 0 {
            return Err(ParleyError::config_error(
                "typing_tick_ms must be greater than 0",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ParleyError::config_error(
                "request_timeout_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn typing_tick(&self) -> Duration {
        Duration::from_millis(self.typing_tick_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn config_path() -> ParleyResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ParleyError::config_error("could not determine config directory"))?;
    Ok(config_dir.join("parley").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn empty_ai_name_is_rejected() {
        let mut config = Config::default();
        config.ai_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_server_url_is_rejected() {
        let mut config = Config::default();
        config.server_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_path_is_under_the_platform_config_dir() {
        let path = config_path().unwrap();
        assert!(path.ends_with(PathBuf::from("parley").join("config.json")));
        assert!(path.starts_with(dirs::config_dir().unwrap()));
    }

    #[test]
    fn config_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.server_url = "http://10.0.0.2:5000".to_string();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: Config =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.server_url, "http://10.0.0.2:5000");
        assert_eq!(loaded.clear_delay_ms, 800);
    }
}

use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file searched for upward from the working directory.
pub const CONFIG_FILE_NAME: &str = "roster.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,

    #[serde(default = "default_max_idle_time_ms")]
    pub max_idle_time_ms: u64,

    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_name() -> String {
    "employee_directory".to_string()
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_server_selection_timeout_ms() -> u64 {
    15_000
}

fn default_max_idle_time_ms() -> u64 {
    30_000
}

fn default_connect_attempts() -> u32 {
    3
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            name: default_name(),
            max_pool_size: default_max_pool_size(),
            server_selection_timeout_ms: default_server_selection_timeout_ms(),
            max_idle_time_ms: default_max_idle_time_ms(),
            connect_attempts: default_connect_attempts(),
        }
    }
}

impl DatabaseSettings {
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }

    pub fn max_idle_time(&self) -> Duration {
        Duration::from_millis(self.max_idle_time_ms)
    }

    /// Whether the URI points at an Atlas cluster (SRV record lookup).
    pub fn is_atlas(&self) -> bool {
        self.uri.starts_with("mongodb+srv://")
    }

    /// The connection URI with any password replaced, safe for logging.
    pub fn redacted_uri(&self) -> String {
        match url::Url::parse(&self.uri) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("****"));
                }
                parsed.to_string()
            }
            Err(_) => "<unparseable uri>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub production: bool,

    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_slow_threshold_ms() -> u64 {
    100
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            production: false,
            slow_threshold_ms: default_slow_threshold_ms(),
        }
    }
}

impl ServerSettings {
    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }
}

impl RosterConfig {
    /// Load configuration starting from `start_path`.
    ///
    /// Walks upward looking for `roster.yml`. Falls back to defaults when no
    /// file is found.
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DirectoryError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: RosterConfig = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply values coming from CLI flags or the environment.
    pub fn with_overrides(mut self, uri: Option<String>, name: Option<String>) -> Self {
        if let Some(uri) = uri {
            self.database.uri = uri;
        }
        if let Some(name) = name {
            self.database.name = name;
        }
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

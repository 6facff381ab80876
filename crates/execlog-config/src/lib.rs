use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Overrides `http_method.enabled` when set
pub const ENV_HTTP_METHOD_ENABLED: &str = "EXECLOG_HTTP_METHOD_ENABLED";

static GLOBAL: OnceLock<Config> = OnceLock::new();
static DEFAULT: OnceLock<Config> = OnceLock::new();

/// Process-wide logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http_method: HttpMethodConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Global logging of HTTP handler calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpMethodConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub log_return: bool,

    #[serde(default = "default_true")]
    pub log_parameters: bool,

    /// Reported as the declaring type of intercepted requests
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_method: HttpMethodConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HttpMethodConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_return: true,
            log_parameters: true,
            service_name: default_service_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_service_name() -> String {
    "http".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, config.to_toml()?)?;
            config
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read config {}: {}", path.display(), e))?;
        Self::from_toml(&content)?.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_HTTP_METHOD_ENABLED) {
            self.http_method.enabled = parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "{} must be true/false/1/0/yes/no, got '{}'",
                    ENV_HTTP_METHOD_ENABLED,
                    raw
                )
            })?;
        }
        Ok(self)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "execlog", "execlog") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.execlog/config.toml")
        }
    }

    /// Make this the process-wide config. Only the first call succeeds.
    pub fn install(self) -> anyhow::Result<&'static Config> {
        let mut fresh = false;
        let installed = GLOBAL.get_or_init(|| {
            fresh = true;
            self
        });

        if !fresh {
            anyhow::bail!("Configuration already installed");
        }
        Ok(installed)
    }

    /// Installed config, or defaults when nothing was installed
    pub fn global() -> &'static Config {
        GLOBAL
            .get()
            .unwrap_or_else(|| DEFAULT.get_or_init(Config::default))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

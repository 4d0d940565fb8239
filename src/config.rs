use crate::constants::{DEFAULT_SOURCE_URL, DEFAULT_TAB_PARAM};
use crate::error::{Result, ScheduleError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Upstream encoding of the schedule spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    /// Published CSV export
    Csv,
    /// Query-table (gviz) JSON export
    Gviz,
    /// Key/value JSON API
    Api,
    /// Built-in demo rows, no network
    Demo,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Csv => "csv",
            SourceEncoding::Gviz => "gviz",
            SourceEncoding::Api => "api",
            SourceEncoding::Demo => "demo",
        }
    }
}

impl FromStr for SourceEncoding {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceEncoding::Csv),
            "gviz" => Ok(SourceEncoding::Gviz),
            "api" => Ok(SourceEncoding::Api),
            "demo" => Ok(SourceEncoding::Demo),
            other => Err(ScheduleError::Config(format!(
                "Unknown source encoding '{other}' (expected csv, gviz, api or demo)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub schedule: ScheduleConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub encoding: SourceEncoding,
    pub base_url: String,
    /// Query parameter that carries the tab name
    pub tab_param: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            encoding: SourceEncoding::Csv,
            base_url: DEFAULT_SOURCE_URL.to_string(),
            tab_param: DEFAULT_TAB_PARAM.to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub hide_past_shows: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hide_past_shows: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LH_*` and `DEMO_MODE` environment overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(encoding) = lookup("LH_SOURCE_ENCODING") {
            self.source.encoding = encoding.parse()?;
        }
        if let Some(url) = lookup("LH_SOURCE_URL").filter(|v| !v.trim().is_empty()) {
            self.source.base_url = url.trim().to_string();
        }
        if let Some(param) = lookup("LH_TAB_PARAM").filter(|v| !v.trim().is_empty()) {
            self.source.tab_param = param.trim().to_string();
        }
        let demo = lookup("DEMO_MODE")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if demo {
            self.source.encoding = SourceEncoding::Demo;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.source.encoding != SourceEncoding::Demo && self.source.base_url.trim().is_empty() {
            return Err(ScheduleError::Config(
                "source.base_url is required unless encoding is 'demo'".into(),
            ));
        }
        if self.source.tab_param.trim().is_empty() {
            return Err(ScheduleError::Config("source.tab_param must not be empty".into()));
        }
        if self.source.timeout_seconds == 0 {
            return Err(ScheduleError::Config(
                "source.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

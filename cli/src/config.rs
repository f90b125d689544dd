use crate::render::TableStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Keys left unset fall through to the layer below when configs are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub output: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub style: Option<TableStyle>,
}

impl OutputConfig {
    pub fn style(&self) -> TableStyle {
        self.style.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(anyhow::anyhow!(
                "Unsupported config format {:?} for {:?}. Use .yaml, .yml, or .toml",
                other,
                path
            )),
        }
    }
}

impl Config {
    /// Parse a config file, picking YAML or TOML by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let parsed: Result<Config> = match format {
            Format::Yaml => serde_yaml::from_str(&content).map_err(anyhow::Error::from),
            Format::Toml => toml::from_str(&content).map_err(anyhow::Error::from),
        };
        parsed.with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Resolve and load the active configuration.
    ///
    /// An explicit path (flag or `JOBCTL_CONFIG`) must exist; otherwise the
    /// system file and then the per-user file are layered when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(common::CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let layers: Vec<PathBuf> = [
            Some(PathBuf::from(common::DEFAULT_CONFIG_PATH)),
            expand_home(common::USER_CONFIG_PATH),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self::load_layers(&layers)
    }

    /// Merge existing files in order, later ones winning key by key.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Config::default();
        for path in paths.iter().filter(|p| p.exists()) {
            config.merge(Self::from_file(path)?);
        }
        Ok(config)
    }

    /// Overlay the keys `other` actually sets.
    pub fn merge(&mut self, other: Config) {
        if other.logging.level.is_some() {
            self.logging.level = other.logging.level;
        }
        if other.logging.output.is_some() {
            self.logging.output = other.logging.output;
        }
        if other.output.style.is_some() {
            self.output.style = other.output.style;
        }
    }
}

fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => std::env::var_os("HOME").map(|home| PathBuf::from(home).join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

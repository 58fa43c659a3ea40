// src/config.rs
use crate::export::ConflictAction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::{uuid, Uuid};

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_USER_UUID: Uuid = uuid!("be2ffb22-4b5b-4875-8b9a-06eb02d24421");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Where exported YAML files are saved.
    pub download_dir: PathBuf,
    /// Identifier written into every export.
    pub user_id: Uuid,
    pub conflict_action: ConflictAction,
    /// JSON log file, in addition to stderr.
    pub log_file: Option<PathBuf>,
    /// Section the values were read from.
    #[serde(skip)]
    pub environment: String,
    /// File the values were read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloads"),
            user_id: DEFAULT_USER_UUID,
            conflict_action: ConflictAction::Uniquify,
            log_file: None,
            environment: "local".to_string(),
            source: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ExporterConfig,
    #[serde(default)]
    production: ExporterConfig,
}

impl ExporterConfig {
    /// Load `path`, or `config.yaml` when no path is given. Only the implicit
    /// default file may be absent, in which case defaults are used.
    ///
    /// Runs before logging is set up; callers report `environment` and
    /// `source` once it is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();

        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !config_path.exists() {
            if path.is_some() {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            return Self {
                environment,
                ..Self::default()
            }
            .resolved();
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = Self::from_yaml(&content, &environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(Self {
            source: Some(config_path),
            ..config
        })
    }

    pub fn log_summary(&self) {
        info!("Loaded configuration for environment: {}", self.environment);
        match &self.source {
            Some(path) => info!("Configuration file: {}", path.display()),
            None => info!("{} not found, using default configuration", DEFAULT_CONFIG_FILE),
        }
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };
        Self {
            environment: environment.to_string(),
            ..env_config
        }
        .resolved()
    }

    fn get_environment() -> String {
        std::env::var("JOB_EXPORTER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn resolved(self) -> Result<Self> {
        Ok(Self {
            download_dir: Self::resolve_path(&self.download_dir)?,
            log_file: self
                .log_file
                .as_deref()
                .map(Self::resolve_path)
                .transpose()?,
            ..self
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

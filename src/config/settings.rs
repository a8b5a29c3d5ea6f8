//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they round-trip through a TOML file and can be cloned into workers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Startup-fatal configuration problems.
///
/// These are checked before any batch work begins; they are never per-file
/// conditions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in the config file and none in the environment.
    #[error(
        "no classification API key configured; set classifier.api_key or the {API_KEY_ENV} environment variable"
    )]
    MissingApiKey,

    /// `transcriber.model` does not name a registered model.
    #[error("unknown transcription model id: {0}")]
    UnknownModel(String),
}

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ---------------------------------------------------------------------------
// TranscriberConfig
// ---------------------------------------------------------------------------

/// Settings for the Whisper transcription engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Registered model id (e.g. `"whisper-tiny"`, `"whisper-small"`).
    pub model: String,
    /// ISO-639-1 speech language, or `"auto"` for built-in detection.
    pub language: String,
    /// Beam-search width; 1 means greedy decoding.
    pub beam_size: i32,
    /// Per-file transcription deadline in seconds.  `None` (the default)
    /// waits indefinitely.  When set, a file that exceeds the deadline gets
    /// a `Timeout` error record and its worker slot moves on; the inference
    /// thread itself is abandoned, not cancelled.
    pub timeout_secs: Option<u64>,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            model: "whisper-tiny".into(),
            language: "auto".into(),
            beam_size: 3,
            timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ClassifierConfig
// ---------------------------------------------------------------------------

/// Settings for the LLM classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// API key; `None` falls back to [`API_KEY_ENV`] at startup.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature.  Kept at 0.0 so identical transcripts tend to
    /// produce identical verdicts.
    pub temperature: f32,
    /// Maximum seconds to wait for a classification response.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            temperature: 0.0,
            timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    /// Resolve the API key from config or environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingApiKey`] when neither source provides a
    /// non-empty key.  Callers treat this as fatal before the batch starts.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = self.api_key.as_deref() {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Copy of this config with the API key resolved and filled in.
    pub fn with_resolved_api_key(&self) -> Result<Self, ConfigError> {
        let key = self.resolve_api_key()?;
        Ok(Self {
            api_key: Some(key),
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// BatchConfig
// ---------------------------------------------------------------------------

/// Settings for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory scanned for audio files.
    pub input_dir: PathBuf,
    /// CSV report destination; overwritten on every run.
    pub output_file: PathBuf,
    /// Upper bound on concurrently processed files.
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw_audio"),
            output_file: PathBuf::from("data/results.csv"),
            concurrency: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub transcriber: TranscriberConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("cannot parse config file: {}", path.display()))
    }

    /// Load settings from `path`, or fall back to defaults when the file
    /// does not exist (first run).
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Persist settings as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create config dir: {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("cannot serialize config")?;
        std::fs::write(path, raw)
            .with_context(|| format!("cannot write config file: {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

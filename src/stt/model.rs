//! Whisper model registry and on-disk path resolution.
//!
//! The screener runs the standard multilingual GGML models.  `tiny` keeps a
//! large batch moving on modest CPUs; `small` is the accuracy/speed balance
//! worth using when verdicts feed a manual review queue.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ModelInfo
// ---------------------------------------------------------------------------

/// Static metadata for a GGML model file.
#[derive(Debug)]
pub struct ModelInfo {
    /// Identifier used in `TranscriberConfig::model` (e.g. `"whisper-tiny"`).
    pub id: &'static str,
    /// File name under the models directory.
    pub file_name: &'static str,
    /// Approximate file size in megabytes.
    pub file_size_mb: u64,
    /// Download location for the GGML file.
    pub source_url: &'static str,
}

/// Multilingual Whisper GGML models supported by the screener.
pub const WHISPER_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "whisper-tiny",
        file_name: "ggml-tiny.bin",
        file_size_mb: 75,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp",
    },
    ModelInfo {
        id: "whisper-base",
        file_name: "ggml-base.bin",
        file_size_mb: 142,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp",
    },
    ModelInfo {
        id: "whisper-small",
        file_name: "ggml-small.bin",
        file_size_mb: 466,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp",
    },
];

/// Find a [`ModelInfo`] by its `id` string.
pub fn find_model_by_id(id: &str) -> Option<&'static ModelInfo> {
    WHISPER_MODELS.iter().find(|m| m.id == id)
}

// ---------------------------------------------------------------------------
// ModelStore
// ---------------------------------------------------------------------------

/// Resolves the on-disk location of model files.
#[derive(Debug, Clone)]
pub struct ModelStore {
    /// Directory that contains (or will contain) GGML `.bin` files.
    pub models_dir: PathBuf,
}

impl ModelStore {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Full path to the GGML file for the given model.
    pub fn model_path(&self, model: &ModelInfo) -> PathBuf {
        self.models_dir.join(model.file_name)
    }

    /// Returns `true` if the model file exists on disk.
    pub fn is_available(&self, model: &ModelInfo) -> bool {
        self.model_path(model).exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_are_unique() {
        for (i, a) in WHISPER_MODELS.iter().enumerate() {
            for b in &WHISPER_MODELS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.file_name, b.file_name);
            }
        }
    }

    #[test]
    fn find_model_by_id_known() {
        let m = find_model_by_id("whisper-tiny").unwrap();
        assert_eq!(m.file_name, "ggml-tiny.bin");
    }

    #[test]
    fn find_model_by_id_unknown() {
        assert!(find_model_by_id("does-not-exist").is_none());
    }

    #[test]
    fn model_path_joins_file_name() {
        let store = ModelStore::new("/models");
        let p = store.model_path(&WHISPER_MODELS[0]);
        assert!(p.to_str().unwrap().ends_with("ggml-tiny.bin"));
    }

    #[test]
    fn missing_model_is_not_available() {
        let store = ModelStore::new("/nonexistent/path");
        assert!(!store.is_available(&WHISPER_MODELS[0]));
    }
}

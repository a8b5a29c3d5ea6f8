//! Core transcription trait and the Whisper implementation.
//!
//! [`Transcriber`] is the interface the batch pipeline works against.  It is
//! object-safe and `Send + Sync` so an engine can be shared across workers
//! behind an `Arc<dyn Transcriber>`.
//!
//! [`WhisperTranscriber`] is the production implementation wrapping a
//! `whisper_rs::WhisperContext`.  A fresh `WhisperState` is created per call,
//! so concurrent transcription from multiple workers needs no locking.
//!
//! [`MockTranscriber`] (test-only) returns a canned response without loading
//! a model file.

use std::path::Path;

use thiserror::Error;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// All errors that can arise from the transcription subsystem.
///
/// Variants carry message strings (not source errors) so the type stays
/// `Clone`: the lazy engine handle caches a construction failure and
/// re-issues it to every subsequent caller.
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    /// The GGML model file does not exist at the resolved path.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// whisper-rs failed to initialise a context or inference state.
    #[error("whisper context initialisation failed: {0}")]
    ContextInit(String),

    /// The engine could not be constructed; cached by the shared handle and
    /// returned for every file without retrying.
    #[error("transcription model unavailable: {0}")]
    ModelUnavailable(String),

    /// The audio file could not be decoded to PCM.  Carries the decoder's
    /// message verbatim; it lands in the report's `reason` column.
    #[error("{0}")]
    Decode(String),

    /// The inference pass itself failed.  Message is carried verbatim for
    /// the same reason as [`TranscribeError::Decode`].
    #[error("{0}")]
    Inference(String),

    /// The call exceeded the configured per-file deadline.
    #[error("transcription timed out after {0}s")]
    Timeout(u64),
}

impl From<audio::DecodeError> for TranscribeError {
    fn from(e: audio::DecodeError) -> Self {
        TranscribeError::Decode(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for file transcription.
///
/// # Contract
///
/// - Returns the full transcript with segments joined by a single space and
///   leading/trailing whitespace trimmed.
/// - Performs no retries; any engine fault surfaces as a [`TranscribeError`]
///   carrying the underlying message.
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `path` and return its transcript text.
    fn transcribe_file(&self, path: &Path) -> Result<String, TranscribeError>;
}

// Compile-time assertion: Box<dyn Transcriber> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transcriber>) {}
};

// ---------------------------------------------------------------------------
// InferenceOptions
// ---------------------------------------------------------------------------

/// Decoding settings for a Whisper inference run.
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    /// ISO-639-1 language code, or `"auto"` for built-in detection.
    pub language: String,
    /// Beam-search width; 1 falls back to greedy decoding.
    pub beam_size: i32,
    /// CPU threads handed to Whisper.
    pub n_threads: i32,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            beam_size: 3,
            n_threads: optimal_threads(),
        }
    }
}

/// Physical CPU threads to use for inference, capped at 8; Whisper sees
/// diminishing returns past that.
pub(crate) fn optimal_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(8) as i32)
        .unwrap_or(4)
}

/// whisper.cpp rejects inputs shorter than one second; shorter recordings
/// are padded with trailing silence up to this many samples.
const MIN_INFERENCE_SAMPLES: usize = 16_000;

// ---------------------------------------------------------------------------
// WhisperTranscriber
// ---------------------------------------------------------------------------

/// Production transcriber wrapping a `whisper_rs::WhisperContext`.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
    options: InferenceOptions,
}

impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but declares
// `unsafe impl Send + Sync` in whisper-rs; the model weights are read-only
// after loading, and each call creates its own state.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperTranscriber {}
unsafe impl Sync for WhisperTranscriber {}

impl WhisperTranscriber {
    /// Load a GGML model from `model_path`.
    ///
    /// # Errors
    ///
    /// - [`TranscribeError::ModelNotFound`] — no file at `model_path`.
    /// - [`TranscribeError::ContextInit`] — whisper-rs rejected the file.
    pub fn load(
        model_path: impl AsRef<Path>,
        options: InferenceOptions,
    ) -> Result<Self, TranscribeError> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(TranscribeError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            TranscribeError::ModelNotFound(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| TranscribeError::ContextInit(e.to_string()))?;

        Ok(Self { ctx, options })
    }

    /// Run inference over already-prepared 16 kHz mono samples.
    fn transcribe_samples(&self, mut samples: Vec<f32>) -> Result<String, TranscribeError> {
        if samples.len() < MIN_INFERENCE_SAMPLES {
            samples.resize(MIN_INFERENCE_SAMPLES, 0.0);
        }

        let strategy = if self.options.beam_size > 1 {
            SamplingStrategy::BeamSearch {
                beam_size: self.options.beam_size,
                patience: 1.0,
            }
        } else {
            SamplingStrategy::Greedy { best_of: 1 }
        };

        let mut params = FullParams::new(strategy);
        let lang: Option<&str> = if self.options.language == "auto" {
            None
        } else {
            Some(self.options.language.as_str())
        };
        params.set_language(lang);
        params.set_n_threads(self.options.n_threads);
        params.set_print_progress(false);
        params.set_print_realtime(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| TranscribeError::ContextInit(e.to_string()))?;

        state
            .full(params, &samples)
            .map_err(|e| TranscribeError::Inference(e.to_string()))?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| TranscribeError::Inference(e.to_string()))?;

        // Segments join with a single space, in engine emission order.
        let mut parts: Vec<String> = Vec::with_capacity(n_segments as usize);
        for i in 0..n_segments {
            let seg = state
                .full_get_segment_text(i)
                .map_err(|e| TranscribeError::Inference(format!("segment {i}: {e}")))?;
            let seg = seg.trim();
            if !seg.is_empty() {
                parts.push(seg.to_string());
            }
        }

        Ok(parts.join(" "))
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe_file(&self, path: &Path) -> Result<String, TranscribeError> {
        let samples = audio::load_mono_16k(path)?;
        self.transcribe_samples(samples)
    }
}

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

/// Test double returning a canned response for any path.
#[cfg(test)]
pub struct MockTranscriber {
    response: Result<String, TranscribeError>,
}

#[cfg(test)]
impl MockTranscriber {
    /// A mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A mock that always returns `Err(error)`.
    pub fn err(error: TranscribeError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl Transcriber for MockTranscriber {
    fn transcribe_file(&self, _path: &Path) -> Result<String, TranscribeError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- MockTranscriber ---------------------------------------------------

    #[test]
    fn mock_ok_returns_configured_text() {
        let t = MockTranscriber::ok("share your otp now");
        assert_eq!(
            t.transcribe_file(Path::new("x.wav")).unwrap(),
            "share your otp now"
        );
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let t = MockTranscriber::err(TranscribeError::Inference("boom".into()));
        let err = t.transcribe_file(Path::new("x.wav")).unwrap_err();
        assert!(matches!(err, TranscribeError::Inference(_)));
    }

    // ---- WhisperTranscriber::load ------------------------------------------

    #[test]
    fn load_missing_model_returns_model_not_found() {
        let result = WhisperTranscriber::load("/nonexistent/model.bin", Default::default());
        assert!(
            matches!(result, Err(TranscribeError::ModelNotFound(_))),
            "expected ModelNotFound, got: {result:?}"
        );
    }

    // ---- trait object safety -----------------------------------------------

    #[test]
    fn box_dyn_transcriber_compiles() {
        let t: Box<dyn Transcriber> = Box::new(MockTranscriber::ok("ok"));
        let _ = t.transcribe_file(Path::new("a.wav"));
    }

    // ---- errors ------------------------------------------------------------

    #[test]
    fn decode_error_converts_with_message() {
        let decode = audio::DecodeError::NoAudioTrack;
        let err: TranscribeError = decode.into();
        assert!(matches!(err, TranscribeError::Decode(_)));
        assert!(err.to_string().contains("no audio track"));
    }

    #[test]
    fn timeout_display_mentions_seconds() {
        assert!(TranscribeError::Timeout(30).to_string().contains("30"));
    }

    // ---- options -----------------------------------------------------------

    #[test]
    fn default_options_use_auto_language() {
        let opts = InferenceOptions::default();
        assert_eq!(opts.language, "auto");
        assert!(opts.beam_size >= 1);
    }

    #[test]
    fn optimal_threads_is_positive_and_at_most_8() {
        let t = optimal_threads();
        assert!((1..=8).contains(&t));
    }
}

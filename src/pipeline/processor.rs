//! Per-file processing pipeline.
//!
//! [`FileProcessor::process`] drives one file through
//! transcribe → normalize → classify and always returns a [`ResultRecord`]:
//! any stage failure is folded into an error-labelled record for that file
//! alone, never raised to the batch.
//!
//! Whisper inference is blocking, so it runs under
//! `tokio::task::spawn_blocking`; the async worker only awaits it.  When a
//! per-file deadline is configured the await is bounded by
//! `tokio::time::timeout`; the abandoned inference thread runs to
//! completion in the background, but the worker slot is released.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::llm::{lenient, Classifier};
use crate::pipeline::record::ResultRecord;
use crate::stt::{TranscribeError, Transcriber};
use crate::text::normalize;

// ---------------------------------------------------------------------------
// FileProcessor
// ---------------------------------------------------------------------------

/// Processes a single audio file into a [`ResultRecord`].
///
/// Cheap to share: workers hold it behind an `Arc` and call
/// [`process`](Self::process) concurrently.
pub struct FileProcessor {
    input_dir: PathBuf,
    transcriber: Arc<dyn Transcriber>,
    classifier: Arc<dyn Classifier>,
    transcribe_timeout: Option<Duration>,
}

impl FileProcessor {
    /// Create a processor for files under `input_dir`.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        transcriber: Arc<dyn Transcriber>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            transcriber,
            classifier,
            transcribe_timeout: None,
        }
    }

    /// Bound each transcription call by `timeout`.  `None` (the default)
    /// waits indefinitely, matching the unhardened contract.
    pub fn with_transcribe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transcribe_timeout = timeout;
        self
    }

    /// Run the full per-file pipeline.  Never fails.
    pub async fn process(&self, file_name: &str) -> ResultRecord {
        log::info!("processing {file_name}");

        let transcript = match self.transcribe(self.input_dir.join(file_name)).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("transcription failed for {file_name}: {e}");
                return ResultRecord::failed(file_name, e.to_string());
            }
        };
        log::info!("transcribed {file_name} ({} chars)", transcript.len());

        let cleaned = normalize(&transcript);

        let verdict = match self.classifier.classify(&cleaned).await {
            Ok(verdict) => verdict,
            // A LenientClassifier never errs; any other backend degrades
            // identically here so the file still gets its row.
            Err(e) => lenient::degrade(e),
        };
        log::info!("classified {file_name}: {}", verdict.label);

        ResultRecord::classified(file_name, cleaned, verdict)
    }

    /// Transcribe on the blocking pool, optionally bounded by the deadline.
    async fn transcribe(&self, path: PathBuf) -> Result<String, TranscribeError> {
        let transcriber = Arc::clone(&self.transcriber);
        let task = tokio::task::spawn_blocking(move || transcriber.transcribe_file(&path));

        let joined = match self.transcribe_timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => return Err(TranscribeError::Timeout(limit.as_secs())),
            },
            None => task.await,
        };

        match joined {
            Ok(result) => result,
            Err(e) => Err(TranscribeError::Inference(format!(
                "transcription task failed: {e}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

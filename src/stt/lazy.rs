//! Process-scoped lazy engine handle.
//!
//! Loading a GGML model takes seconds and hundreds of megabytes, so exactly
//! one engine is constructed per process, on first use, and shared by every
//! worker.  If construction fails, the failure is cached and every later
//! call gets the same [`TranscribeError::ModelUnavailable`] immediately;
//! the model is never reloaded per file.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::stt::engine::{Transcriber, TranscribeError};

// ---------------------------------------------------------------------------
// LazyTranscriber
// ---------------------------------------------------------------------------

/// Lazily constructs an inner [`Transcriber`] on first call and hands out
/// the shared instance afterwards.
///
/// `LazyTranscriber` itself implements [`Transcriber`], so the pipeline can
/// hold it behind the same `Arc<dyn Transcriber>` as a pre-built engine or a
/// test double.  Construction happens on whichever worker thread transcribes
/// first; concurrent first callers block until the one construction settles.
pub struct LazyTranscriber {
    cell: OnceLock<Result<Arc<dyn Transcriber>, TranscribeError>>,
    init: Box<dyn Fn() -> Result<Arc<dyn Transcriber>, TranscribeError> + Send + Sync>,
}

impl LazyTranscriber {
    /// Wrap a constructor closure.  The closure runs at most once.
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Transcriber>, TranscribeError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            init: Box::new(init),
        }
    }

    /// Get the shared engine, constructing it on the first call.
    ///
    /// A construction failure is cached: every call after the first failure
    /// returns [`TranscribeError::ModelUnavailable`] carrying the original
    /// message, without re-running the constructor.
    pub fn get(&self) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        let slot = self.cell.get_or_init(|| {
            (self.init)().map_err(|e| TranscribeError::ModelUnavailable(e.to_string()))
        });
        slot.clone()
    }
}

impl Transcriber for LazyTranscriber {
    fn transcribe_file(&self, path: &Path) -> Result<String, TranscribeError> {
        self.get()?.transcribe_file(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt::engine::MockTranscriber;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn constructor_runs_once_for_many_calls() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let lazy = LazyTranscriber::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MockTranscriber::ok("hello")) as Arc<dyn Transcriber>)
        });

        for _ in 0..5 {
            assert_eq!(
                lazy.transcribe_file(Path::new("a.wav")).unwrap(),
                "hello"
            );
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn construction_failure_is_cached_as_model_unavailable() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let lazy = LazyTranscriber::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Err(TranscribeError::ModelNotFound("/models/ggml-tiny.bin".into()))
        });

        for _ in 0..3 {
            let err = lazy.transcribe_file(Path::new("a.wav")).unwrap_err();
            assert!(
                matches!(err, TranscribeError::ModelUnavailable(_)),
                "expected ModelUnavailable, got {err:?}"
            );
            assert!(err.to_string().contains("/models/ggml-tiny.bin"));
        }
        // The failing constructor must not be retried.
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shared_across_threads() {
        let lazy = Arc::new(LazyTranscriber::new(|| {
            Ok(Arc::new(MockTranscriber::ok("t")) as Arc<dyn Transcriber>)
        }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                std::thread::spawn(move || lazy.transcribe_file(Path::new("x.wav")).unwrap())
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), "t");
        }
    }
}

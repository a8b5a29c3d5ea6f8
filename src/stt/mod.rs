//! Speech-to-text subsystem.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Transcriber (trait)                   │
//! │                                                      │
//! │   ┌────────────┐     ┌────────────────────┐          │
//! │   │ ModelStore  │────▶│ WhisperTranscriber │          │
//! │   │ - resolve   │     │ - ctx + options    │          │
//! │   └────────────┘     └─────────┬──────────┘          │
//! │                                 │                     │
//! │        ┌────────────────┐       ▼                     │
//! │        │ LazyTranscriber │  transcribe_file()         │
//! │        │ build-once +    │  audio file → text         │
//! │        │ cached failure  │                            │
//! │        └────────────────┘                            │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline holds an `Arc<dyn Transcriber>`; in production that is a
//! [`LazyTranscriber`] which loads the Whisper model on the first file and
//! shares it across workers.

pub mod engine;
pub mod lazy;
pub mod model;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::{InferenceOptions, TranscribeError, Transcriber, WhisperTranscriber};
pub use lazy::LazyTranscriber;
pub use model::{find_model_by_id, ModelInfo, ModelStore, WHISPER_MODELS};

// test-only re-export so pipeline test modules can import MockTranscriber
// without the full engine path.
#[cfg(test)]
pub use engine::MockTranscriber;

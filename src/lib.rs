//! `call-screener` — batch fraud screening for recorded phone calls.
//!
//! # Overview
//!
//! The screener walks a directory of call recordings and produces one CSV
//! report classifying each call as fraudulent or genuine:
//!
//! ```text
//! .wav/.flac/.mp3 ─▶ decode ─▶ Whisper transcription ─▶ normalize
//!                 ─▶ LLM classification ─▶ {label, confidence, reason}
//!                 ─▶ one CSV row per file
//! ```
//!
//! Failures stay local to their file: a corrupt recording or an unreachable
//! classification service yields an `Error`/`Unknown` row, never an aborted
//! batch.
//!
//! # Module map
//!
//! - [`audio`] — file decode to 16 kHz mono PCM
//! - [`stt`] — `Transcriber` trait, Whisper engine, lazy shared handle
//! - [`text`] — transcript normalization
//! - [`llm`] — `Classifier` trait, OpenAI-compatible backend, verdicts
//! - [`pipeline`] — per-file processor and batch orchestrator
//! - [`report`] — CSV aggregation
//! - [`config`] — settings, paths, credential resolution

pub mod audio;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod stt;
pub mod text;

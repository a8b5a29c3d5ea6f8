//! LLM classification module.
//!
//! This module provides:
//! * [`Classifier`] — async trait implemented by all classification backends.
//! * [`ApiClassifier`] — OpenAI-compatible REST API classifier.
//! * [`LenientClassifier`] — wraps any classifier; degrades every failure to
//!   an `"Unknown"` verdict instead of erroring.
//! * [`prompt`] — fixed fraud-detection prompt template.
//! * [`Verdict`] — the structured `{label, confidence, reason}` judgment.
//! * [`ClassifyError`] — error variants for classification calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use call_screener::config::ClassifierConfig;
//! use call_screener::llm::{ApiClassifier, Classifier, LenientClassifier};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClassifierConfig::default();
//!
//!     // Build a classifier that never fails (degrades to "Unknown").
//!     let classifier = LenientClassifier::new(ApiClassifier::from_config(&config));
//!
//!     let verdict = classifier
//!         .classify("share your otp now")
//!         .await
//!         .unwrap();
//!     println!("{}: {}", verdict.label, verdict.reason);
//! }
//! ```

pub mod classifier;
pub mod lenient;
pub mod prompt;
pub mod verdict;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classifier::{ApiClassifier, Classifier, ClassifyError};
pub use lenient::LenientClassifier;
pub use verdict::Verdict;

//! Transcript text normalization.
//!
//! A single pure function, [`normalize`], prepares raw speech-to-text output
//! for classification: lowercase, strip punctuation, drop filler words,
//! collapse whitespace.  No I/O, no failure modes.

pub mod normalize;

pub use normalize::{normalize, FILLER_WORDS};

//! Audio file loading — container decode → downmix → resample.
//!
//! # Pipeline
//!
//! ```text
//! .wav / .flac / .mp3 file → symphonia probe + decode → interleaved f32
//!                          → downmix_to_mono → resample_to_16k
//! ```
//!
//! Whisper inference requires **16 kHz mono f32** PCM; [`load_mono_16k`] is
//! the one-call entry point that produces it from any supported file.

pub mod convert;
pub mod decode;

pub use convert::{downmix_to_mono, resample_to_16k, WHISPER_SAMPLE_RATE};
pub use decode::{decode_file, load_mono_16k, DecodeError, DecodedAudio};

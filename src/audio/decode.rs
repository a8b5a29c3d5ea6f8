//! Audio file decoding via Symphonia.
//!
//! [`decode_file`] probes the container, picks the first audio track and
//! decodes every packet into interleaved f32 samples.  [`load_mono_16k`]
//! layers the downmix/resample conversion on top and is what the
//! transcription engine calls.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::audio::convert::{downmix_to_mono, resample_to_16k};

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Errors raised while turning an audio file into PCM samples.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file could not be opened.
    #[error("cannot open audio file: {0}")]
    Open(#[from] std::io::Error),

    /// Symphonia does not recognise the container / codec.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The container holds no decodable audio track.
    #[error("no audio track found")]
    NoAudioTrack,

    /// Packet-level decode failure partway through the file.
    #[error("audio decode failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// DecodedAudio
// ---------------------------------------------------------------------------

/// Raw decoder output: interleaved samples plus the source layout.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved f32 samples, `channels` per frame.
    pub samples: Vec<f32>,
    /// Source sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: usize,
}

// ---------------------------------------------------------------------------
// decode_file
// ---------------------------------------------------------------------------

/// Decode `path` into interleaved f32 PCM.
///
/// The file extension is passed to the prober as a hint only; the actual
/// format is detected from the content, so a mislabelled file still decodes
/// when Symphonia recognises it.
///
/// Malformed packets inside an otherwise readable stream are skipped (calls
/// are often clipped mid-recording); an unreadable container is an error.
pub fn decode_file(path: &Path) -> Result<DecodedAudio, DecodeError> {
    let file = File::open(path)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_rate = 0_u32;
    let mut channels = 0_usize;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an UnexpectedEof I/O error.
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count();
                    sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
                }
                // sample_buf was just populated above.
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            // Skip corrupt packets, keep whatever decodes.
            Err(SymphoniaError::DecodeError(e)) => {
                log::debug!("skipping undecodable packet in {}: {e}", path.display());
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::Decode("file contains no decodable audio".into()));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

// ---------------------------------------------------------------------------
// load_mono_16k
// ---------------------------------------------------------------------------

/// Decode `path` and convert it to the 16 kHz mono f32 layout Whisper needs.
pub fn load_mono_16k(path: &Path) -> Result<Vec<f32>, DecodeError> {
    let decoded = decode_file(path)?;
    let mono = downmix_to_mono(&decoded.samples, decoded.channels);
    Ok(resample_to_16k(&mono, decoded.sample_rate))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

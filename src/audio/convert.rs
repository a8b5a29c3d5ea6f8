//! Channel downmix and sample-rate conversion.
//!
//! Decoded call recordings arrive at whatever layout the file was saved in
//! (stereo 44.1 kHz CD rips, 8 kHz mono telephony captures, …).  Whisper
//! wants exactly one layout, so every file passes through these two steps
//! after decoding.

/// Sample rate required by the Whisper engine, in Hz.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

// ---------------------------------------------------------------------------
// downmix_to_mono
// ---------------------------------------------------------------------------

/// Mix interleaved multi-channel audio down to mono by averaging channels.
///
/// The output holds `samples.len() / channels` frames.  Mono input is
/// returned as-is (no averaging pass); zero channels yields an empty vector.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => samples
            .chunks_exact(n)
            .map(|frame| frame.iter().sum::<f32>() / n as f32)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// resample_to_16k
// ---------------------------------------------------------------------------

/// Resample mono audio from `source_rate` Hz to 16 kHz by linear
/// interpolation.
///
/// Input already at 16 kHz is copied through unchanged.  Linear
/// interpolation is plenty for speech headed into Whisper; the model is
/// trained on far noisier input than interpolation artifacts.
pub fn resample_to_16k(samples: &[f32], source_rate: u32) -> Vec<f32> {
    if source_rate == WHISPER_SAMPLE_RATE {
        return samples.to_vec();
    }
    if samples.is_empty() || source_rate == 0 {
        return Vec::new();
    }

    let ratio = WHISPER_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples.len() as f64 * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos as usize;
        let frac = (src_pos - idx as f64) as f32;

        let sample = match samples.get(idx) {
            Some(&a) => match samples.get(idx + 1) {
                Some(&b) => a * (1.0 - frac) + b * frac,
                None => a,
            },
            None => 0.0,
        };
        output.push(sample);
    }

    output
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

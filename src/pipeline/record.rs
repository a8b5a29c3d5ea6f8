//! Per-file result records.

use crate::llm::Verdict;

// ---------------------------------------------------------------------------
// ResultRecord
// ---------------------------------------------------------------------------

/// One report row: a file, its (cleaned) transcript, and its verdict fields.
///
/// Exactly one record exists per discovered audio file, whatever happened
/// to it: a failed stage produces an error record rather than dropping the
/// file from the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// File name relative to the input directory.
    pub audio_file: String,
    /// Normalized transcript; empty when transcription failed.
    pub transcript: String,
    /// Verdict label, or [`Verdict::ERROR`] for pipeline-stage failures.
    pub label: String,
    /// Verdict confidence; `0.0` on any failure path.
    pub confidence: f64,
    /// Verdict reason, or the failure message.
    pub reason: String,
}

impl ResultRecord {
    /// Record for a file that made it through classification.
    pub fn classified(
        audio_file: impl Into<String>,
        transcript: impl Into<String>,
        verdict: Verdict,
    ) -> Self {
        Self {
            audio_file: audio_file.into(),
            transcript: transcript.into(),
            label: verdict.label,
            confidence: verdict.confidence,
            reason: verdict.reason,
        }
    }

    /// Record for a file that failed before classification.
    pub fn failed(audio_file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            audio_file: audio_file.into(),
            transcript: String::new(),
            label: Verdict::ERROR.into(),
            confidence: 0.0,
            reason: reason.into(),
        }
    }

    /// `true` when a pipeline stage failed for this file.
    pub fn is_error(&self) -> bool {
        self.label == Verdict::ERROR
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_copies_verdict_fields() {
        let record = ResultRecord::classified(
            "call.wav",
            "share your otp now",
            Verdict {
                label: Verdict::FRAUD.into(),
                confidence: 0.95,
                reason: "asks for otp".into(),
            },
        );
        assert_eq!(record.audio_file, "call.wav");
        assert_eq!(record.transcript, "share your otp now");
        assert_eq!(record.label, "Fraud");
        assert!((record.confidence - 0.95).abs() < 1e-9);
        assert!(!record.is_error());
    }

    #[test]
    fn failed_uses_error_sentinels() {
        let record = ResultRecord::failed("call.mp3", "corrupt file");
        assert_eq!(record.transcript, "");
        assert_eq!(record.label, "Error");
        assert_eq!(record.confidence, 0.0);
        assert_eq!(record.reason, "corrupt file");
        assert!(record.is_error());
    }
}

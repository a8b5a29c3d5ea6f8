//! Structured classification verdicts.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The classification service's judgment for one transcript.
///
/// `label` is deliberately a plain `String`: the service contract names
/// `"Fraud"` / `"Genuine"`, the adapters add `"Unknown"` and the pipeline
/// adds `"Error"`, but the set is open to extension without a schema change.
/// Well-known values are available as associated constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Classification label, e.g. [`Verdict::FRAUD`].
    pub label: String,
    /// Confidence in `[0, 1]`; `0.0` is the sentinel when unavailable.
    pub confidence: f64,
    /// Free-text explanation.
    pub reason: String,
}

impl Verdict {
    /// The call is a scam attempt.
    pub const FRAUD: &'static str = "Fraud";
    /// The call is a normal conversation.
    pub const GENUINE: &'static str = "Genuine";
    /// Classification could not produce a confident verdict.
    pub const UNKNOWN: &'static str = "Unknown";
    /// An earlier pipeline stage failed; no classification was attempted.
    pub const ERROR: &'static str = "Error";

    /// Build the degraded verdict used when classification cannot answer.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            label: Self::UNKNOWN.into(),
            confidence: 0.0,
            reason: reason.into(),
        }
    }

    /// Parse a verdict from the service's raw JSON text.
    ///
    /// The response must be a JSON object with exactly the expected fields;
    /// confidence is clamped into `[0, 1]` afterwards (models occasionally
    /// emit `1.2` or `-0.1`).
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut verdict: Verdict = serde_json::from_str(raw)?;
        verdict.confidence = if verdict.confidence.is_finite() {
            verdict.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(verdict)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_json() {
        let v = Verdict::from_json(
            r#"{"label": "Fraud", "confidence": 0.92, "reason": "requests OTP"}"#,
        )
        .unwrap();
        assert_eq!(v.label, Verdict::FRAUD);
        assert!((v.confidence - 0.92).abs() < 1e-9);
        assert_eq!(v.reason, "requests OTP");
    }

    #[test]
    fn rejects_non_json_text() {
        assert!(Verdict::from_json("sorry, cannot help").is_err());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(Verdict::from_json(r#"{"label": "Fraud"}"#).is_err());
    }

    #[test]
    fn clamps_out_of_range_confidence() {
        let v = Verdict::from_json(r#"{"label":"Genuine","confidence":1.7,"reason":"x"}"#)
            .unwrap();
        assert_eq!(v.confidence, 1.0);

        let v = Verdict::from_json(r#"{"label":"Genuine","confidence":-0.4,"reason":"x"}"#)
            .unwrap();
        assert_eq!(v.confidence, 0.0);
    }

    #[test]
    fn unknown_carries_zero_confidence() {
        let v = Verdict::unknown("service unreachable");
        assert_eq!(v.label, Verdict::UNKNOWN);
        assert_eq!(v.confidence, 0.0);
        assert_eq!(v.reason, "service unreachable");
    }
}

//! Lenient classifier — wraps any [`Classifier`] and never returns an error.
//!
//! The batch pipeline must produce a row for every file, so classification
//! failures cannot abort a file.  [`LenientClassifier`] converts every
//! [`ClassifyError`] into an `"Unknown"`-labelled [`Verdict`]:
//!
//! - unparseable response → the first 200 characters of the raw text as the
//!   reason (or a fixed fallback when no content was received);
//! - transport / auth / rate-limit / timeout → `"Error during classification
//!   call: "` plus the underlying message.
//!
//! One attempt per invocation; no retries, no backoff.

use async_trait::async_trait;

use crate::llm::classifier::{Classifier, ClassifyError};
use crate::llm::verdict::Verdict;

/// Maximum characters of a raw unparseable response quoted into a reason.
const RAW_REASON_LIMIT: usize = 200;

/// Reason used when the service produced no content at all.
const NO_RESPONSE_REASON: &str = "Failed to parse LLM response";

// ---------------------------------------------------------------------------
// LenientClassifier
// ---------------------------------------------------------------------------

/// A transparent wrapper around any [`Classifier`] whose `classify` never
/// returns `Err(_)`: every failure degrades to [`Verdict::unknown`].
pub struct LenientClassifier<C: Classifier> {
    inner: C,
}

impl<C: Classifier> LenientClassifier<C> {
    /// Wrap `inner` with degrade-on-failure behaviour.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Reference to the wrapped classifier.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// Map a classification failure to its degraded verdict.
///
/// Shared with the file processor so a non-lenient backend degrades the
/// same way instead of failing the file.
pub(crate) fn degrade(err: ClassifyError) -> Verdict {
    match err {
        ClassifyError::Parse { raw } => {
            Verdict::unknown(raw.chars().take(RAW_REASON_LIMIT).collect::<String>())
        }
        ClassifyError::EmptyResponse => Verdict::unknown(NO_RESPONSE_REASON),
        other => Verdict::unknown(format!("Error during classification call: {other}")),
    }
}

#[async_trait]
impl<C: Classifier + Send + Sync> Classifier for LenientClassifier<C> {
    /// Attempt classification; degrade any failure to an "Unknown" verdict.
    ///
    /// This implementation **never** returns `Err(_)`.
    async fn classify(&self, transcript: &str) -> Result<Verdict, ClassifyError> {
        match self.inner.classify(transcript).await {
            Ok(verdict) => Ok(verdict),
            Err(err) => {
                log::warn!("classification degraded to Unknown: {err}");
                Ok(degrade(err))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed verdict.
    struct AlwaysOk(Verdict);

    #[async_trait]
    impl Classifier for AlwaysOk {
        async fn classify(&self, _t: &str) -> Result<Verdict, ClassifyError> {
            Ok(self.0.clone())
        }
    }

    /// Always returns the error produced by the factory closure.
    struct AlwaysFails(fn() -> ClassifyError);

    #[async_trait]
    impl Classifier for AlwaysFails {
        async fn classify(&self, _t: &str) -> Result<Verdict, ClassifyError> {
            Err((self.0)())
        }
    }

    fn fraud_verdict() -> Verdict {
        Verdict {
            label: Verdict::FRAUD.into(),
            confidence: 0.9,
            reason: "requests OTP".into(),
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn passes_through_success() {
        let classifier = LenientClassifier::new(AlwaysOk(fraud_verdict()));
        let v = classifier.classify("share your otp").await.unwrap();
        assert_eq!(v, fraud_verdict());
    }

    #[tokio::test]
    async fn non_json_response_becomes_unknown_with_raw_reason() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::Parse {
            raw: "sorry, cannot help".into(),
        }));
        let v = classifier.classify("text").await.unwrap();
        assert_eq!(v.label, Verdict::UNKNOWN);
        assert_eq!(v.confidence, 0.0);
        assert_eq!(v.reason, "sorry, cannot help");
    }

    #[tokio::test]
    async fn long_raw_response_is_capped_at_200_chars() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::Parse {
            raw: "x".repeat(500),
        }));
        let v = classifier.classify("text").await.unwrap();
        assert_eq!(v.reason.chars().count(), 200);
    }

    #[tokio::test]
    async fn empty_response_uses_fixed_fallback_reason() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::EmptyResponse));
        let v = classifier.classify("text").await.unwrap();
        assert_eq!(v.label, Verdict::UNKNOWN);
        assert_eq!(v.reason, "Failed to parse LLM response");
    }

    #[tokio::test]
    async fn transport_error_is_prefixed() {
        let classifier = LenientClassifier::new(AlwaysFails(|| {
            ClassifyError::Request("connection refused".into())
        }));
        let v = classifier.classify("text").await.unwrap();
        assert_eq!(v.label, Verdict::UNKNOWN);
        assert!(v
            .reason
            .starts_with("Error during classification call: "));
        assert!(v.reason.contains("connection refused"));
    }

    #[tokio::test]
    async fn timeout_is_prefixed() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::Timeout));
        let v = classifier.classify("text").await.unwrap();
        assert!(v.reason.starts_with("Error during classification call: "));
    }

    #[tokio::test]
    async fn http_status_is_prefixed() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::Status(429)));
        let v = classifier.classify("text").await.unwrap();
        assert!(v.reason.contains("429"));
        assert!(v.reason.starts_with("Error during classification call: "));
    }

    #[tokio::test]
    async fn never_returns_err() {
        let classifier = LenientClassifier::new(AlwaysFails(|| ClassifyError::Timeout));
        assert!(classifier.classify("test").await.is_ok());
    }

    /// LenientClassifier<C> must itself be a valid `dyn Classifier`.
    #[test]
    fn lenient_is_object_safe() {
        let inner = AlwaysOk(fraud_verdict());
        let _: Box<dyn Classifier> = Box::new(LenientClassifier::new(inner));
    }
}

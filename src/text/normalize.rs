//! Deterministic transcript cleanup.
//!
//! Whisper output is messy: mixed case, punctuation, hesitation noises,
//! politeness fillers.  None of that helps the classifier, so everything is
//! reduced to a flat lowercase token stream before it reaches the prompt.

// ---------------------------------------------------------------------------
// Filler words
// ---------------------------------------------------------------------------

/// Whole words removed from transcripts before classification.
///
/// Hesitation sounds plus the politeness fillers that dominate scam-call
/// transcripts ("ok", "please", "thank") without carrying intent.  `haan`
/// and `haina` are Hindi acknowledgement particles common in the source
/// recordings.
pub const FILLER_WORDS: &[&str] = &[
    "uh", "um", "hmm", "haan", "haina", "ok", "okay", "please", "thank",
];

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Normalize a raw transcript for classification.
///
/// Transform, in order:
/// 1. lowercase everything;
/// 2. replace every character that is not a lowercase ASCII letter, digit,
///    or whitespace with a space (punctuation, symbols, non-Latin script);
/// 3. drop whole-word occurrences of [`FILLER_WORDS`];
/// 4. collapse whitespace runs to single spaces and trim.
///
/// Never fails; the empty string maps to the empty string.  The function is
/// idempotent: applying it twice yields the same result as applying it once.
///
/// # Example
///
/// ```
/// use call_screener::text::normalize;
///
/// assert_eq!(normalize("Please share your OTP, okay?"), "share your otp");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let scrubbed: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    scrubbed
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- basic transform ---------------------------------------------------

    #[test]
    fn lowercases_input() {
        assert_eq!(normalize("HELLO World"), "hello world");
    }

    #[test]
    fn strips_punctuation_to_spaces() {
        assert_eq!(normalize("one,two;three!"), "one two three");
    }

    #[test]
    fn digits_are_preserved() {
        assert_eq!(normalize("code 4521 sent"), "code 4521 sent");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a  \t b\n\nc"), "a b c");
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize("  hello  "), "hello");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn punctuation_only_input_yields_empty_output() {
        assert_eq!(normalize("?!... --"), "");
    }

    // ---- filler removal ----------------------------------------------------

    #[test]
    fn removes_filler_words() {
        let out = normalize("Please say OTP okay");
        assert!(!out.split(' ').any(|w| w == "please"));
        assert!(!out.split(' ').any(|w| w == "okay"));
        assert!(out.split(' ').any(|w| w == "otp"));
    }

    #[test]
    fn removes_fillers_case_insensitively() {
        assert_eq!(normalize("UM hello UH there"), "hello there");
    }

    #[test]
    fn keeps_fillers_embedded_in_longer_words() {
        // "umbrella" contains "um" but is not a whole-word match.
        assert_eq!(normalize("umbrella okra"), "umbrella okra");
    }

    #[test]
    fn removes_hindi_acknowledgement_particles() {
        assert_eq!(normalize("haan account haina blocked"), "account blocked");
    }

    // ---- non-ASCII handling ------------------------------------------------

    #[test]
    fn non_ascii_letters_become_spaces() {
        // Accented and non-Latin characters are outside the a-z/0-9 set.
        assert_eq!(normalize("café नमस्ते bank"), "caf bank");
    }

    // ---- idempotence -------------------------------------------------------

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Please share your OTP, okay?",
            "UM... HELLO!!  world  ",
            "",
            "already clean text",
            "123-456-7890",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}

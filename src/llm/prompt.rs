//! Fraud-detection prompt construction.
//!
//! [`build_chat`] produces the `(system_msg, user_msg)` pair sent to any
//! OpenAI-compatible `/v1/chat/completions` endpoint.  The instruction is
//! fixed; only the transcript varies, so identical transcripts produce
//! identical requests (the sampling side of determinism is temperature 0).

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
You are an expert fraud detection assistant.
Your task: analyze a phone call transcript and classify it as Fraud or Genuine.

Guidelines:
- Do not rely only on specific words like \"OTP\" or \"password\".
- Judge the caller's intent, tone, and context.
- Consider manipulation, urgency, impersonation, or attempts to extract sensitive data.

Classify as Fraud if:
- The caller requests or hints at personal, financial, or confidential details (OTP, CVV, PIN, Aadhaar, bank info, etc.).
- The caller impersonates a trusted entity (bank, government, telecom, etc.) to gain trust.
- The caller pressures the listener into urgent or suspicious actions (\"verify immediately\", \"account blocked\", \"click this link\").
- The caller promises unrealistic benefits, rewards, or refunds to lure the listener.

Classify as Genuine if:
- The conversation is informative, personal, or a normal customer-service interaction.
- The caller does not request sensitive data or show manipulative behavior.

Return only a valid JSON object with exactly these fields:
{
  \"label\": \"<Fraud or Genuine>\",
  \"confidence\": <number between 0 and 1>,
  \"reason\": \"<short explanation>\"
}";

// ---------------------------------------------------------------------------
// build_chat
// ---------------------------------------------------------------------------

/// Build the `(system_msg, user_msg)` pair for one transcript.
pub fn build_chat(transcript: &str) -> (String, String) {
    let user_msg = format!("Transcript:\n\"\"\"{transcript}\"\"\"");
    (SYSTEM_INSTRUCTION.to_string(), user_msg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

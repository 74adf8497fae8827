// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context summaries: short semantic digests of a message, used both as a
//! storage tag and for query expansion at retrieval time.

use mnemo_core::{CompletionRequest, ProviderAdapter};
use tracing::warn;

/// Token budget for a summary completion. Summaries are one short sentence.
const SUMMARY_MAX_TOKENS: u32 = 128;

/// Prompt template for context summaries. The model must answer with either
/// a standalone one-line summary or the literal word "none".
const CONTEXT_SUMMARY_PROMPT: &str = r#"You are a memory assistant.

Generate a short, high-quality contextual summary of the message below so it can be retrieved later by intent or meaning.

Focus on:
- The intent or fact stated (a name shared, a question asked, a command given, a preference expressed)
- Any personal data (name, location, preferences)
- Any task, question, or command

Be precise and self-contained. Never output generic statements like "The user said something" -- state exactly what was shared (e.g. "User shared their name is Ayush"). If there is nothing worth extracting, answer with the single word: none

Answer only with the standalone summary, no explanation, no prefixes.

Message: {message}
Summary:"#;

/// Ask the provider for a context summary of `text`.
///
/// Returns `None` when the provider fails or judges there is nothing worth
/// extracting; the failure text itself is never returned. A summarizer
/// outage must not abort ingestion, so the error is logged and absorbed
/// here.
pub async fn generate_context_summary(
    provider: &dyn ProviderAdapter,
    model: &str,
    text: &str,
) -> Option<String> {
    let request = CompletionRequest {
        model: model.to_string(),
        prompt: CONTEXT_SUMMARY_PROMPT.replace("{message}", text),
        max_tokens: SUMMARY_MAX_TOKENS,
    };

    match provider.complete(request).await {
        Ok(response) => normalize_summary(&response.content),
        Err(error) => {
            warn!(%error, "context summary failed, storing without context");
            None
        }
    }
}

/// Trim a raw summary and map the "nothing to extract" sentinel to `None`.
fn normalize_summary(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_none_case_insensitively() {
        assert_eq!(normalize_summary("none"), None);
        assert_eq!(normalize_summary("None"), None);
        assert_eq!(normalize_summary("  NONE \n"), None);
    }

    #[test]
    fn real_summary_is_trimmed_and_kept() {
        assert_eq!(
            normalize_summary("  User shared their name is Ayush\n"),
            Some("User shared their name is Ayush".to_string())
        );
    }

    #[test]
    fn empty_output_maps_to_none() {
        assert_eq!(normalize_summary(""), None);
        assert_eq!(normalize_summary("   "), None);
    }

    #[test]
    fn sentinel_inside_a_sentence_is_kept() {
        assert_eq!(
            normalize_summary("User said none of the options work"),
            Some("User said none of the options work".to_string())
        );
    }

    #[test]
    fn prompt_embeds_the_message() {
        let prompt = CONTEXT_SUMMARY_PROMPT.replace("{message}", "My name is Ayush");
        assert!(prompt.contains("Message: My name is Ayush"));
    }
}

// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission filter: decides whether a message is worth persisting.
//!
//! The rule is deliberately narrow. Only exact whole-message matches or
//! messages whose every whitespace-split word appears in the denylist are
//! rejected; anything else is stored. Discarding meaningful text is the
//! failure mode to avoid, so there is no substring matching and no
//! punctuation stripping.

/// Trivial greetings, acknowledgments, and filler not worth remembering.
const TRIVIAL_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "thanks",
    "thank you",
    "ok",
    "okay",
    "yes",
    "no",
    "sure",
    "good",
    "great",
    "nice",
    "cool",
    "bye",
    "goodbye",
    "see you",
    "lol",
    "haha",
    "hmm",
    "oh",
    "got it",
    "understood",
    "will do",
    "sounds good",
    "alright",
    "no problem",
    "you too",
    "take care",
    "have a nice day",
    "i see",
    "interesting",
    "right",
    "exactly",
    "absolutely",
    "i agree",
    "i understand",
    "that's fine",
    "that's okay",
];

/// Returns false only when the trimmed, lowercased message is a denylisted
/// phrase, or every whitespace-split word of it is a denylisted token.
pub fn is_worth_storing(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();

    if TRIVIAL_PHRASES.contains(&normalized.as_str()) {
        return false;
    }

    let mut words = normalized.split_whitespace().peekable();
    if words.peek().is_some() && words.all(|word| TRIVIAL_PHRASES.contains(&word)) {
        return false;
    }

    true
}

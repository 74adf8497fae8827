// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grounding prompt assembly from retrieved context.

/// Build the reply prompt from the user input and both context sets:
/// ranked conversational memory first, then static user-profile knowledge.
pub fn build_grounding_prompt(
    agent_name: &str,
    user_input: &str,
    memory_context: &[String],
    knowledge_context: &[String],
) -> String {
    let memory = memory_context.join("\n");
    let knowledge = knowledge_context.join("\n");

    format!(
        r#"You are {agent_name}, a concise and intelligent personal AI assistant.

Here are the last few things you talked about:
{memory}

Furthermore, here is some additional context about the user:
{knowledge}

Instruction:
Given the user input below, respond in a short, factual, and helpful way using the above context only if it is relevant. Do NOT guess or overexplain. Do NOT repeat sentences from the context verbatim; phrase things naturally. If no context applies, respond naturally and ask clarifying questions.

User: "{user_input}""#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_input_and_both_context_blocks() {
        let prompt = build_grounding_prompt(
            "mnemo",
            "what's my name?",
            &["My name is Ayush".to_string()],
            &["The user works night shifts.".to_string()],
        );
        assert!(prompt.contains("You are mnemo"));
        assert!(prompt.contains("My name is Ayush"));
        assert!(prompt.contains("The user works night shifts."));
        assert!(prompt.contains(r#"User: "what's my name?""#));
        // Memory context precedes profile knowledge.
        assert!(
            prompt.find("My name is Ayush").unwrap()
                < prompt.find("The user works night shifts.").unwrap()
        );
    }

    #[test]
    fn empty_context_still_produces_a_usable_prompt() {
        let prompt = build_grounding_prompt("mnemo", "hello there", &[], &[]);
        assert!(prompt.contains(r#"User: "hello there""#));
        assert!(prompt.contains("respond naturally"));
    }
}

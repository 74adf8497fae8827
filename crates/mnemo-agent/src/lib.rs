// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for the mnemo assistant.
//!
//! Wires the memory store, the static knowledge store, and a completion
//! provider into a single turn loop: reload, evict, store, retrieve, reply.

pub mod handler;
pub mod prompt;

pub use handler::ConversationHandler;
pub use prompt::build_grounding_prompt;

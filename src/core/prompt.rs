//! Turns a conversation into the message list sent to the model server.

use crate::api::ChatMessage;
use crate::core::conversation::Conversation;
use crate::core::message::ROLE_SYSTEM;

pub use crate::core::constants::SYSTEM_INSTRUCTION;

/// Build the role-tagged message list for one generation call.
///
/// The result always starts with `system` and then mirrors the conversation
/// turn for turn, so its length is `conversation.len() + 1`. No I/O happens
/// here; the same conversation always yields the same messages.
pub fn assemble(system: &str, conversation: &Conversation) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage::new(ROLE_SYSTEM, system));
    messages.extend(
        conversation
            .iter()
            .map(|turn| ChatMessage::new(turn.role().as_str(), turn.content())),
    );
    messages
}

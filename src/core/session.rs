//! One user's chat session: transcript, model choice and the in-flight flag.

use tracing::warn;

use crate::core::backend::{BackendError, ChatBackend, GenerationRequest};
use crate::core::constants::{DEFAULT_TEMPERATURE, SYSTEM_INSTRUCTION};
use crate::core::conversation::Conversation;
use crate::core::message::Turn;
use crate::core::models::ModelSelection;
use crate::core::prompt::assemble;

#[derive(Debug, Clone)]
pub struct ChatSession {
    conversation: Conversation,
    model: ModelSelection,
    temperature: f32,
    awaiting_reply: bool,
}

impl ChatSession {
    pub fn new(model: ModelSelection, temperature: f32) -> Self {
        Self {
            conversation: Conversation::new(),
            model,
            temperature,
            awaiting_reply: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn model(&self) -> ModelSelection {
        self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Record the user's message and build the request for the backend.
    ///
    /// Returns `None` without touching the transcript when the text is blank
    /// or a reply is still outstanding.
    pub fn begin_turn(&mut self, text: impl Into<String>) -> Option<GenerationRequest> {
        let text = text.into();
        if self.awaiting_reply || text.trim().is_empty() {
            return None;
        }

        self.conversation.append(Turn::user(text));
        self.awaiting_reply = true;

        Some(GenerationRequest {
            model: self.model,
            messages: assemble(SYSTEM_INSTRUCTION, &self.conversation),
            temperature: self.temperature,
        })
    }

    /// Settle the outstanding request. A failure leaves the user's turn in
    /// place and is handed back unchanged.
    pub fn complete_turn(
        &mut self,
        outcome: Result<String, BackendError>,
    ) -> Result<(), BackendError> {
        self.awaiting_reply = false;
        let reply = outcome?;
        self.conversation.append(Turn::assistant(reply));
        Ok(())
    }

    /// Submit `text` and wait for the reply. Returns the recorded assistant
    /// turn, or `None` when the input was ignored.
    pub async fn send(
        &mut self,
        backend: &dyn ChatBackend,
        text: impl Into<String>,
    ) -> Result<Option<&Turn>, BackendError> {
        let Some(request) = self.begin_turn(text) else {
            return Ok(None);
        };

        let outcome = backend.generate(&request).await;
        if let Err(err) = &outcome {
            warn!(model = %request.model, error = %err, "generation failed");
        }
        self.complete_turn(outcome)?;
        Ok(self.conversation.last())
    }

    /// Reset the transcript to the greeting. Refused while a reply is
    /// outstanding; returns whether the reset happened.
    pub fn clear(&mut self) -> bool {
        if self.awaiting_reply {
            return false;
        }
        self.conversation.reset();
        true
    }

    /// Returns whether the model changed.
    pub fn select_model(&mut self, model: ModelSelection) -> bool {
        if self.awaiting_reply || self.model == model {
            return false;
        }
        self.model = model;
        true
    }

    pub fn cycle_model(&mut self, forward: bool) -> bool {
        let target = if forward {
            self.model.next()
        } else {
            self.model.previous()
        };
        self.select_model(target)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(ModelSelection::default(), DEFAULT_TEMPERATURE)
    }
}

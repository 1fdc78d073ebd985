//! Application state driven by the terminal event loop.
//!
//! [`App`] owns the [`ChatSession`] for the lifetime of the UI together with
//! the presentation state in [`UiState`]. Handlers in `ui::chat_loop` call
//! the methods here; none of them perform I/O, so the whole state machine can
//! be exercised without a terminal or a model server.

pub mod ui_state;

pub use ui_state::{Status, StatusKind, UiState};

use tracing::{info, warn};

use crate::core::backend::{BackendError, GenerationRequest};
use crate::core::config::Settings;
use crate::core::session::ChatSession;
use crate::ui::theme::Theme;

pub struct App {
    pub session: ChatSession,
    pub ui: UiState,
    pub base_url: String,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: ChatSession::new(settings.model, settings.temperature),
            ui: UiState::new(Theme::from_name(&settings.theme)),
            base_url: settings.base_url.clone(),
        }
    }

    /// Turn the input buffer into a request for the backend.
    ///
    /// Returns `None` when the input is blank or a reply is still pending;
    /// in the latter case the typed text is kept.
    pub fn submit_input(&mut self) -> Option<GenerationRequest> {
        if self.session.is_awaiting_reply() {
            self.ui.set_status(StatusKind::Warning, "Still waiting for the current reply");
            return None;
        }
        if self.ui.input_text().trim().is_empty() {
            return None;
        }

        let text = self.ui.take_input();
        let request = self.session.begin_turn(text)?;
        self.ui.clear_status();
        self.ui.begin_waiting();
        self.ui.scroll_to_bottom();
        Some(request)
    }

    /// Apply the backend's answer to the outstanding request.
    pub fn finish_generation(&mut self, outcome: Result<String, BackendError>) {
        self.ui.end_waiting();
        match self.session.complete_turn(outcome) {
            Ok(()) => self.ui.scroll_to_bottom(),
            Err(err) => {
                warn!(error = %err, "backend call failed");
                self.ui.set_status(StatusKind::Error, err.to_string());
            }
        }
    }

    pub fn clear_history(&mut self) {
        if self.session.clear() {
            info!("chat history cleared");
            self.ui.set_status(StatusKind::Info, "Chat history cleared");
            self.ui.scroll_offset = 0;
            self.ui.scroll_to_bottom();
        } else {
            self.ui.set_status(
                StatusKind::Warning,
                "Cannot clear history while a reply is pending",
            );
        }
    }

    pub fn cycle_model(&mut self, forward: bool) {
        if self.session.cycle_model(forward) {
            let model = self.session.model();
            info!(%model, "model selected");
            self.ui.set_status(StatusKind::Info, format!("Model: {model}"));
        } else if self.session.is_awaiting_reply() {
            self.ui.set_status(
                StatusKind::Warning,
                "Cannot switch models while a reply is pending",
            );
        }
    }
}

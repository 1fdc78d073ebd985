//! Main chat event loop
//!
//! Draws the frame, turns terminal events into [`ChatAction`]s and hands
//! generation requests to a background task. Replies come back over an mpsc
//! channel and are applied between frames, so the screen keeps redrawing
//! (progress indicator included) while the model server is working.

mod keybindings;
mod lifecycle;

pub use self::keybindings::{action_for, ChatAction, ScrollAmount};

use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use crate::core::app::App;
use crate::core::backend::{BackendError, ChatBackend, GenerationRequest, OllamaBackend};
use crate::core::config::Settings;
use crate::ui::renderer::{screen_areas, transcript_max_scroll, ui};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use std::{error::Error, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{debug, info};

type GenerationOutcome = Result<String, BackendError>;

#[derive(Debug, PartialEq)]
pub enum LoopControl {
    Continue,
    Generate(GenerationRequest),
    Quit,
}

/// Viewport numbers the scroll actions need, measured from the last frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBounds {
    pub max_offset: u16,
    pub page: u16,
}

impl ScrollBounds {
    pub fn measure(app: &App, area: Rect) -> Self {
        let page = screen_areas(app, area)
            .transcript_inner()
            .height
            .saturating_sub(1)
            .max(1);
        Self {
            max_offset: transcript_max_scroll(app, area),
            page,
        }
    }

    fn lines(&self, amount: ScrollAmount) -> u16 {
        match amount {
            ScrollAmount::Line => 1,
            ScrollAmount::Page => self.page,
        }
    }
}

pub fn apply_action(app: &mut App, action: ChatAction, bounds: ScrollBounds) -> LoopControl {
    match action {
        ChatAction::Quit => return LoopControl::Quit,
        ChatAction::Submit => {
            if let Some(request) = app.submit_input() {
                return LoopControl::Generate(request);
            }
        }
        ChatAction::InsertChar(c) => app.ui.insert_char(c),
        ChatAction::NewLine => app.ui.insert_newline(),
        ChatAction::Backspace => app.ui.backspace(),
        ChatAction::Edit(key) => app.ui.edit_with_key(key),
        ChatAction::ClearInput => app.ui.clear_input(),
        ChatAction::ClearHistory => app.clear_history(),
        ChatAction::NextModel => app.cycle_model(true),
        ChatAction::PreviousModel => app.cycle_model(false),
        ChatAction::ScrollUp(amount) => app.ui.scroll_up(bounds.lines(amount), bounds.max_offset),
        ChatAction::ScrollDown(amount) => {
            app.ui.scroll_down(bounds.lines(amount), bounds.max_offset)
        }
        ChatAction::ScrollToBottom => app.ui.scroll_to_bottom(),
        ChatAction::Ignore => {}
    }
    LoopControl::Continue
}

fn spawn_generation(
    backend: Arc<dyn ChatBackend>,
    request: GenerationRequest,
    tx: mpsc::UnboundedSender<GenerationOutcome>,
) {
    debug!(model = %request.model, "dispatching generation");
    tokio::spawn(async move {
        let outcome = backend.generate(&request).await;
        // The receiver is gone only if the UI already quit
        let _ = tx.send(outcome);
    });
}

pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let backend: Arc<dyn ChatBackend> = Arc::new(OllamaBackend::new(settings.base_url.clone()));
    let mut app = App::new(&settings);
    info!(
        model = %settings.model,
        base_url = %settings.base_url,
        "starting chat session"
    );

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, backend).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    backend: Arc<dyn ChatBackend>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<GenerationOutcome>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);

            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => action_for(&key),
                Event::Paste(text) => {
                    app.ui.insert_text(&text);
                    ChatAction::Ignore
                }
                _ => ChatAction::Ignore,
            };

            match apply_action(app, action, ScrollBounds::measure(app, area)) {
                LoopControl::Quit => break,
                LoopControl::Generate(request) => {
                    spawn_generation(Arc::clone(&backend), request, tx.clone());
                }
                LoopControl::Continue => {}
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.finish_generation(outcome);
        }
    }

    Ok(())
}

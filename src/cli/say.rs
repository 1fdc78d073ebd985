//! TUI-less "say" command

use std::error::Error;

use crate::core::backend::OllamaBackend;
use crate::core::config::Settings;
use crate::core::session::ChatSession;

pub async fn run_say(prompt: Vec<String>, settings: Settings) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: code-companion say <prompt>");
        std::process::exit(1);
    }

    let backend = OllamaBackend::new(settings.base_url.clone());
    let mut session = ChatSession::new(settings.model, settings.temperature);

    match session.send(&backend, prompt).await {
        Ok(Some(reply)) => println!("{}", reply.content()),
        Ok(None) => {}
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }

    Ok(())
}

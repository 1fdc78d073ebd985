//! Model listing functionality
//!
//! Prints the supported models and checks which of them the server has pulled.

use std::error::Error;

use tracing::warn;

use crate::api::ModelInfo;
use crate::core::backend::OllamaBackend;
use crate::core::config::Settings;
use crate::core::models::ModelSelection;

pub async fn list_models(settings: Settings) -> Result<(), Box<dyn Error>> {
    let backend = OllamaBackend::new(settings.base_url.clone());

    println!("🤖 Supported models ({})", backend.base_url());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let installed = match backend.installed_models().await {
        Ok(models) => Some(models),
        Err(err) => {
            warn!(error = %err, "could not query installed models");
            println!("⚠️  {err}");
            println!();
            None
        }
    };

    for line in catalog_lines(settings.model, installed.as_deref()) {
        println!("{line}");
    }

    if let Some(models) = installed {
        let others: Vec<_> = models
            .iter()
            .filter(|info| {
                !ModelSelection::ALL
                    .iter()
                    .any(|model| model.matches_installed(&info.name))
            })
            .map(|info| info.name.as_str())
            .collect();
        if !others.is_empty() {
            println!();
            println!("Also on the server (not selectable): {}", others.join(", "));
        }
    }

    Ok(())
}

/// One line per supported model: selection marker, id and install state.
fn catalog_lines(selected: ModelSelection, installed: Option<&[ModelInfo]>) -> Vec<String> {
    ModelSelection::ALL
        .iter()
        .map(|&model| {
            let marker = if model == selected { "🎯" } else { "  " };
            let state = match installed {
                Some(models) => match models
                    .iter()
                    .find(|info| model.matches_installed(&info.name))
                {
                    Some(info) => match info.size {
                        Some(size) => format!("installed, {}", human_size(size)),
                        None => "installed".to_string(),
                    },
                    None => format!("not pulled, run: ollama pull {}", model.id()),
                },
                None => "unknown".to_string(),
            };
            format!("{marker} {} ({state})", model.id())
        })
        .collect()
}

fn human_size(bytes: u64) -> String {
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else {
        format!("{:.0} MB", bytes / MB)
    }
}

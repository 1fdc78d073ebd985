//! Code Companion is a terminal chat client for a coding assistant model
//! served by a local Ollama daemon.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session transcript, model selection, prompt assembly
//!   and the generation backend.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`api`] defines the Ollama wire payloads.
//! - [`cli`] parses arguments and dispatches to the chat UI or the one-shot
//!   commands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;

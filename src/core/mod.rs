pub mod app;
pub mod backend;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod message;
pub mod models;
pub mod prompt;
pub mod session;

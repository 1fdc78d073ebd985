//! Terminal UI layer for the interactive chat session.
//!
//! - [`chat_loop`]: the event loop that turns key presses into state changes
//!   and runs generation requests in the background.
//! - [`renderer`] and [`layout`]: frame composition and line wrapping.
//! - [`theme`]: colour policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation and backend coordination.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;

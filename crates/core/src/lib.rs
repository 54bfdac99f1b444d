//! Core logic of the portfolio site's AI conveniences: the prompt
//! service that talks to a text provider, and the per-surface
//! interaction state (project summaries, the chat panel, the contact
//! form).
//!
//! Each surface owns its slice of state exclusively; the only
//! cross-surface data flow is the chat history being read (never
//! mutated) when a reply prompt is built. Every controller enforces a
//! single in-flight request per logical key, and nothing in this crate
//! persists across a session.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat;
mod contact;
mod prompt;
mod summary;

pub use chat::{ChatMessage, ChatPanel, Sender};
pub use contact::{ContactDraft, ContactForm, SubmitError};
pub use prompt::{PromptError, PromptService, TextClient};
pub use summary::{ProjectId, SummaryBoard, SummaryState};

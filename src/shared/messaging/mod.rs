//! Messaging Data Structures
//!
//! Messages, conversation timelines, and user summaries.

pub mod contact;
pub mod conversation;
pub mod message;

pub use contact::UserSummary;
pub use conversation::{Conversation, LoadState};
pub use message::{ChatMessage, Envelope, PushFrame, SendMessageRequest, WireMessage};

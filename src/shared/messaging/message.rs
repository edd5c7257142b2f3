//! Chat Message Data Structures
//!
//! The in-memory message type plus the wire shapes it is decoded from: the
//! history-page payload and the push envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a two-party conversation. Immutable once created.
///
/// Ordering inside a timeline is by server-assigned arrival order; `sent_at`
/// is a cosmetic display timestamp and never participates in ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender identity
    pub from: String,
    /// Recipient identity
    pub to: String,
    /// Message text
    #[serde(rename = "message")]
    pub body: String,
    /// Display timestamp only
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the local clock
    pub fn new(from: impl Into<String>, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }

    /// Whether this message was sent by `self_identity`
    pub fn is_outgoing(&self, self_identity: &str) -> bool {
        self.from == self_identity
    }

    /// Render the display timestamp as "hh:mm am/pm"
    pub fn display_time(&self) -> String {
        self.sent_at.format("%I:%M %p").to_string().to_lowercase()
    }
}

/// History-page wire shape, newest-first within a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub from: String,
    pub to: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<WireMessage> for ChatMessage {
    fn from(wire: WireMessage) -> Self {
        Self {
            from: wire.from,
            to: wire.to,
            body: wire.message,
            sent_at: wire.timestamp.unwrap_or_else(Utc::now),
        }
    }
}

/// Inbound push envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    #[serde(rename = "message")]
    pub body: String,
}

impl Envelope {
    /// The party of this envelope that is not `self_identity`.
    ///
    /// Returns `None` when the envelope does not involve this session at
    /// all, in which case it must be ignored.
    pub fn counterpart(&self, self_identity: &str) -> Option<&str> {
        if self.from == self_identity {
            Some(&self.to)
        } else if self.to == self_identity {
            Some(&self.from)
        } else {
            None
        }
    }

    /// Convert into a timeline message stamped with the local clock
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::new(self.from, self.to, self.body)
    }
}

/// Websocket frame carrying a push envelope on a token-named topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushFrame {
    /// Topic name; matches the session token for frames addressed to us
    pub event: String,
    pub from: String,
    pub to: String,
    pub message: String,
}

impl PushFrame {
    pub fn into_envelope(self) -> Envelope {
        Envelope {
            from: self.from,
            to: self.to,
            body: self.message,
        }
    }
}

/// Request body for the send endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub to: String,
    pub message: String,
}

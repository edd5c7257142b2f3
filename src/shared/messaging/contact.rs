//! User Summary Data Structure
//!
//! The user directory payload returned by the search endpoint. The email is
//! the opaque identity used to address a conversation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as returned by the directory search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user ID
    pub id: Uuid,
    /// Email address; doubles as the conversation identity
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserSummary {
    /// Full name for display in cards and dropdowns
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

//! Roster Manager
//!
//! Tracks the set of conversation cards that are open at the same time and
//! which one of them is focused. A card references a conversation but does
//! not own it: closing a card never discards fetched history, it only
//! removes the card from the visible set.

use crate::shared::messaging::UserSummary;

/// An open conversation card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub user: UserSummary,
}

impl RosterEntry {
    /// The identity this card addresses
    pub fn identity(&self) -> &str {
        &self.user.email
    }
}

/// The set of open cards and the focused conversation
#[derive(Debug, Default)]
pub struct RosterManager {
    entries: Vec<RosterEntry>,
    focus: Option<String>,
}

impl RosterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a card for `user`, or refocus the existing one.
    ///
    /// Returns true when a new card was created. The roster is bounded only
    /// by memory.
    pub fn open_or_focus(&mut self, user: UserSummary) -> bool {
        let newly_opened = !self.is_open(&user.email);
        let identity = user.email.clone();
        if newly_opened {
            self.entries.push(RosterEntry { user });
        }
        self.focus = Some(identity);
        newly_opened
    }

    /// Focus an already-open card; returns false when no such card exists
    pub fn focus(&mut self, identity: &str) -> bool {
        if !self.is_open(identity) {
            return false;
        }
        self.focus = Some(identity.to_string());
        true
    }

    /// Close the card for `identity`.
    ///
    /// If it was focused, focus becomes empty; there is no implicit refocus
    /// to another card.
    pub fn close(&mut self, identity: &str) {
        self.entries.retain(|entry| entry.identity() != identity);
        if self.focus.as_deref() == Some(identity) {
            self.focus = None;
        }
    }

    /// Identity of the focused conversation, if any
    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn is_focused(&self, identity: &str) -> bool {
        self.focus.as_deref() == Some(identity)
    }

    pub fn is_open(&self, identity: &str) -> bool {
        self.entries.iter().any(|entry| entry.identity() == identity)
    }

    /// Open cards in the order they were opened
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}

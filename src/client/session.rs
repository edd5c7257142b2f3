//! Chat Session
//!
//! Facade that wires the conversation engine, the roster, and the search
//! selector together under one authenticated identity. The session attaches
//! the bearer token to every call; an `Auth` error surfaces upward and
//! re-authentication is the caller's concern.

use crate::client::api::ChatApi;
use crate::client::engine::{ConversationEngine, PushPolicy, ScrollAnchor};
use crate::client::roster::RosterManager;
use crate::client::search::SearchSelector;
use crate::shared::config::ClientConfig;
use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Envelope, UserSummary};

/// One authenticated chat session
pub struct ChatSession<A: ChatApi> {
    engine: ConversationEngine<A>,
    roster: RosterManager,
    selector: SearchSelector,
    identity: String,
    token: String,
}

impl<A: ChatApi> ChatSession<A> {
    pub fn new(
        api: A,
        identity: impl Into<String>,
        token: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            engine: ConversationEngine::new(api, page_size),
            roster: RosterManager::new(),
            selector: SearchSelector::new(),
            identity: identity.into(),
            token: token.into(),
        }
    }

    /// Build a session from a configuration carrying a token
    pub fn from_config(
        api: A,
        identity: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self, ChatError> {
        let token = config
            .token()
            .ok_or_else(|| ChatError::auth("not authenticated"))?;
        Ok(Self::new(api, identity, token, config.page_size()))
    }

    pub fn with_push_policy(mut self, policy: PushPolicy) -> Self {
        self.engine = self.engine.with_push_policy(policy);
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn engine(&self) -> &ConversationEngine<A> {
        &self.engine
    }

    pub fn roster(&self) -> &RosterManager {
        &self.roster
    }

    pub fn selector(&self) -> &SearchSelector {
        &self.selector
    }

    pub fn focused(&self) -> Option<&str> {
        self.roster.focused()
    }

    /// Timeline for `identity`, oldest to newest
    pub fn messages(&self, identity: &str) -> &[ChatMessage] {
        self.engine.messages(identity)
    }

    /// Open (or refocus) a card for `user` and load its conversation.
    ///
    /// An already-loaded conversation is reused without a fetch.
    pub async fn open_conversation(
        &mut self,
        user: UserSummary,
    ) -> Result<Option<ScrollAnchor>, ChatError> {
        let identity = user.email.clone();
        self.roster.open_or_focus(user);
        self.engine.select(&identity, &self.token).await
    }

    /// Focus an already-open card; returns false when no such card exists
    pub async fn focus(&mut self, identity: &str) -> Result<bool, ChatError> {
        if !self.roster.focus(identity) {
            return Ok(false);
        }
        // Cached conversations are reused; only a never-loaded one fetches.
        self.engine.select(identity, &self.token).await?;
        Ok(true)
    }

    /// Close the card for `identity`; fetched history stays cached
    pub fn close(&mut self, identity: &str) {
        self.roster.close(identity);
    }

    /// Load one older history page for the focused conversation
    pub async fn load_older(&mut self) -> Result<Option<ScrollAnchor>, ChatError> {
        let Some(focused) = self.roster.focused().map(str::to_string) else {
            return Ok(None);
        };
        self.engine.load_older(&focused, &self.token).await
    }

    /// Send `body` to the focused conversation
    pub async fn send(&mut self, body: &str) -> Result<ScrollAnchor, ChatError> {
        let Some(to) = self.roster.focused().map(str::to_string) else {
            return Err(ChatError::validation(
                "recipient",
                "no conversation is focused",
            ));
        };
        self.engine.send(&to, body, &self.identity, &self.token).await
    }

    /// Inbound entry point for the push channel; one call per envelope
    pub fn handle_envelope(&mut self, envelope: Envelope) -> Option<ScrollAnchor> {
        let focused = self.roster.focused().map(str::to_string);
        self.engine
            .receive_push(envelope, &self.identity, focused.as_deref())
    }

    /// Run a user lookup; results land in [`selector`](Self::selector)
    pub async fn search(&mut self, query: &str) -> Result<(), ChatError> {
        self.selector
            .search(query, self.engine.api(), &self.token)
            .await
    }

    /// Pick a search candidate and open a conversation with them
    pub async fn pick_search_result(
        &mut self,
        identity: &str,
    ) -> Result<Option<ScrollAnchor>, ChatError> {
        match self.selector.take(identity) {
            Some(user) => self.open_conversation(user).await,
            None => Ok(None),
        }
    }
}

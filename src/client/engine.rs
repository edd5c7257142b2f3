//! Conversation Engine
//!
//! The core state machine. Owns every conversation timeline and is the only
//! writer to them: it merges backward history pages, inbound push envelopes,
//! and locally sent messages into one ordered sequence per counterpart, and
//! tells the caller where the viewport should go after each mutation.
//!
//! Because history pages are strictly older than anything already loaded and
//! push envelopes are strictly newer, the two sources never overlap in time
//! and no cross-source dedup key is needed. The single invariant to guard is
//! the pagination cursor: it advances only after a successful fetch, so a
//! failed or stale completion leaves the conversation exactly as it was.

use std::collections::HashMap;

use crate::client::api::ChatApi;
use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Conversation, Envelope, LoadState};

/// Viewport instruction produced by a timeline mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAnchor {
    /// Scroll to the newest message
    Bottom,
    /// Keep the message now at this index at the top of the viewport
    PinTo(usize),
}

/// What to do with a push for a conversation that was never opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushPolicy {
    /// Create a dormant conversation and buffer the message
    #[default]
    BufferDormant,
    /// Discard the envelope
    Drop,
}

/// Per-conversation timeline owner and merge point
pub struct ConversationEngine<A> {
    api: A,
    page_size: u32,
    push_policy: PushPolicy,
    conversations: HashMap<String, Conversation>,
    next_generation: u64,
}

impl<A: ChatApi> ConversationEngine<A> {
    pub fn new(api: A, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            push_policy: PushPolicy::default(),
            conversations: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn with_push_policy(mut self, policy: PushPolicy) -> Self {
        self.push_policy = policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn conversation(&self, identity: &str) -> Option<&Conversation> {
        self.conversations.get(identity)
    }

    /// Timeline for `identity`, oldest to newest; empty when unknown
    pub fn messages(&self, identity: &str) -> &[ChatMessage] {
        self.conversations
            .get(identity)
            .map_or(&[], |conv| conv.messages())
    }

    /// Whether a fetch is in flight for `identity`
    pub fn is_loading(&self, identity: &str) -> bool {
        self.conversations.get(identity).is_some_and(|conv| {
            matches!(conv.load_state(), LoadState::Loading | LoadState::LoadingMore)
        })
    }

    pub fn unread(&self, identity: &str) -> u32 {
        self.conversations
            .get(identity)
            .map_or(0, Conversation::unread)
    }

    /// Clear the unread counter for `identity`
    pub fn mark_read(&mut self, identity: &str) {
        if let Some(conv) = self.conversations.get_mut(identity) {
            conv.mark_read();
        }
    }

    fn alloc_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Open a conversation with `identity`, fetching the first history page
    /// when none has been loaded yet.
    ///
    /// An already-loaded conversation is reused as-is without any fetch. A
    /// failed initial fetch retains no partial state: a freshly created
    /// conversation is removed, a dormant one drops back to `Empty`.
    pub async fn select(
        &mut self,
        identity: &str,
        token: &str,
    ) -> Result<Option<ScrollAnchor>, ChatError> {
        if let Some(conv) = self.conversations.get_mut(identity) {
            if conv.load_state() != LoadState::Empty {
                conv.mark_read();
                return Ok(Some(ScrollAnchor::Bottom));
            }
        }

        let was_dormant = self.conversations.contains_key(identity);
        if !was_dormant {
            let generation = self.alloc_generation();
            self.conversations.insert(
                identity.to_string(),
                Conversation::with_generation(identity, generation),
            );
        }
        let generation = match self.conversations.get_mut(identity) {
            Some(conv) => {
                conv.begin_loading();
                conv.generation()
            }
            None => return Ok(None),
        };

        tracing::info!(counterpart = identity, "loading initial history page");
        let page = match self.api.fetch_page(identity, 1, self.page_size, token).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(counterpart = identity, "initial history fetch failed: {}", err);
                if was_dormant {
                    if let Some(conv) = self.conversations.get_mut(identity) {
                        conv.reset_to_empty();
                    }
                } else {
                    self.conversations.remove(identity);
                }
                return Err(err);
            }
        };

        let Some(conv) = self.conversations.get_mut(identity) else {
            return Ok(None);
        };
        if conv.generation() != generation {
            tracing::debug!(counterpart = identity, "discarding stale initial page");
            return Ok(None);
        }

        conv.install_initial_page(page.into_iter().map(ChatMessage::from).collect(), self.page_size);
        conv.mark_read();
        tracing::info!(
            counterpart = identity,
            messages = conv.len(),
            exhausted = conv.history_exhausted(),
            "conversation loaded"
        );
        Ok(Some(ScrollAnchor::Bottom))
    }

    /// Fetch the next older history page and prepend it to the timeline.
    ///
    /// Issues no fetch (and returns `Ok(None)`) unless the conversation is
    /// `Loaded`, history is not exhausted, and at least one full page is
    /// already on screen; a short initial page already represents the whole
    /// history. The `LoadingMore` state doubles as the reentrancy guard.
    pub async fn load_older(
        &mut self,
        identity: &str,
        token: &str,
    ) -> Result<Option<ScrollAnchor>, ChatError> {
        let (page_number, generation) = {
            let Some(conv) = self.conversations.get_mut(identity) else {
                return Ok(None);
            };
            if conv.load_state() != LoadState::Loaded
                || conv.history_exhausted()
                || (conv.len() as u32) < self.page_size
            {
                return Ok(None);
            }
            conv.begin_loading_more();
            (conv.next_page() + 1, conv.generation())
        };

        tracing::info!(counterpart = identity, page = page_number, "loading older history page");
        let result = self
            .api
            .fetch_page(identity, page_number, self.page_size, token)
            .await;

        let Some(conv) = self.conversations.get_mut(identity) else {
            return Ok(None);
        };
        if conv.generation() != generation {
            tracing::debug!(counterpart = identity, "discarding stale history page");
            return Ok(None);
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                // Cursor and exhaustion latch are untouched; scrolling up
                // again re-requests the same page.
                conv.finish_loading();
                tracing::warn!(counterpart = identity, "older history fetch failed: {}", err);
                return Err(err);
            }
        };

        let prepended =
            conv.prepend_page(page.into_iter().map(ChatMessage::from).collect(), self.page_size);
        if prepended == 0 {
            return Ok(None);
        }
        Ok(Some(ScrollAnchor::PinTo(prepended)))
    }

    /// Inbound-push entry point; called exactly once per envelope, in
    /// receipt order.
    ///
    /// The envelope is appended to its target conversation whether or not
    /// that conversation is focused; only a focused target produces a scroll
    /// instruction. Envelopes for a conversation that was never opened
    /// follow the configured [`PushPolicy`].
    pub fn receive_push(
        &mut self,
        envelope: Envelope,
        self_identity: &str,
        focused: Option<&str>,
    ) -> Option<ScrollAnchor> {
        let counterpart = match envelope.counterpart(self_identity) {
            Some(counterpart) => counterpart.to_string(),
            None => {
                tracing::debug!("ignoring envelope not addressed to this session");
                return None;
            }
        };

        if !self.conversations.contains_key(&counterpart) {
            match self.push_policy {
                PushPolicy::BufferDormant => {
                    let generation = self.alloc_generation();
                    tracing::debug!(counterpart = %counterpart, "buffering push for dormant conversation");
                    self.conversations.insert(
                        counterpart.clone(),
                        Conversation::with_generation(&counterpart, generation),
                    );
                }
                PushPolicy::Drop => {
                    tracing::debug!(counterpart = %counterpart, "dropping push for unknown conversation");
                    return None;
                }
            }
        }

        let conv = self.conversations.get_mut(&counterpart)?;
        conv.append(envelope.into_message());
        if focused == Some(counterpart.as_str()) {
            conv.mark_read();
            Some(ScrollAnchor::Bottom)
        } else {
            conv.note_unread();
            None
        }
    }

    /// Send a message and append it to the timeline.
    ///
    /// The local echo is appended only after the server confirms delivery;
    /// a failed send leaves the timeline untouched.
    pub async fn send(
        &mut self,
        to: &str,
        body: &str,
        self_identity: &str,
        token: &str,
    ) -> Result<ScrollAnchor, ChatError> {
        if body.trim().is_empty() {
            return Err(ChatError::validation("body", "message body is empty"));
        }

        self.api.send_message(to, body, token).await?;

        if !self.conversations.contains_key(to) {
            let generation = self.alloc_generation();
            self.conversations
                .insert(to.to_string(), Conversation::with_generation(to, generation));
        }
        if let Some(conv) = self.conversations.get_mut(to) {
            conv.append(ChatMessage::new(self_identity, to, body));
        }
        tracing::debug!(counterpart = to, "message sent");
        Ok(ScrollAnchor::Bottom)
    }
}

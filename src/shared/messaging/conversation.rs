//! Conversation Timeline State
//!
//! One `Conversation` per distinct counterpart identity: the ordered message
//! timeline (oldest to newest), the backward pagination cursor, the
//! history-exhaustion latch, and the load state machine.

use super::message::ChatMessage;

/// Load state for a conversation's history machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No history fetched yet
    Empty,
    /// Initial page fetch in flight
    Loading,
    /// Timeline populated
    Loaded,
    /// Backward pagination fetch in flight
    LoadingMore,
}

/// A conversation with a single counterpart identity
#[derive(Debug, Clone)]
pub struct Conversation {
    /// The other party's identity; immutable once the conversation exists
    pub counterpart: String,
    messages: Vec<ChatMessage>,
    next_page: u32,
    history_exhausted: bool,
    load_state: LoadState,
    unread: u32,
    generation: u64,
}

impl Conversation {
    /// Create an empty conversation with no history fetched
    pub fn new(counterpart: impl Into<String>) -> Self {
        Self::with_generation(counterpart, 0)
    }

    pub(crate) fn with_generation(counterpart: impl Into<String>, generation: u64) -> Self {
        Self {
            counterpart: counterpart.into(),
            messages: Vec::new(),
            next_page: 0,
            history_exhausted: false,
            load_state: LoadState::Empty,
            unread: 0,
            generation,
        }
    }

    /// Timeline ordered oldest to newest
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of history pages fetched so far; 0 means none
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Latched true once a fetch returned a short (or empty) page
    pub fn history_exhausted(&self) -> bool {
        self.history_exhausted
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Messages appended while this conversation was not focused
    pub fn unread(&self) -> u32 {
        self.unread
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub(crate) fn begin_loading_more(&mut self) {
        self.load_state = LoadState::LoadingMore;
    }

    /// Return to `Loaded` without touching the cursor or the latch
    pub(crate) fn finish_loading(&mut self) {
        self.load_state = LoadState::Loaded;
    }

    /// Return to `Empty` after a failed initial fetch
    pub(crate) fn reset_to_empty(&mut self) {
        self.load_state = LoadState::Empty;
    }

    /// Install the initial history page.
    ///
    /// `page` arrives newest-first as fetched and replaces the timeline
    /// wholesale; any messages buffered while dormant are part of server
    /// history and come back inside the page.
    pub(crate) fn install_initial_page(&mut self, page: Vec<ChatMessage>, page_size: u32) {
        self.history_exhausted = (page.len() as u32) < page_size;
        self.messages = page;
        self.messages.reverse();
        self.next_page = 1;
        self.load_state = LoadState::Loaded;
    }

    /// Prepend an older history page (newest-first as fetched).
    ///
    /// Advances the cursor and updates the exhaustion latch. Returns the
    /// number of messages prepended; the message previously at index 0 ends
    /// up at exactly that index.
    pub(crate) fn prepend_page(&mut self, page: Vec<ChatMessage>, page_size: u32) -> usize {
        let prepended = page.len();
        self.history_exhausted = (prepended as u32) < page_size;
        let mut timeline = page;
        timeline.reverse();
        timeline.append(&mut self.messages);
        self.messages = timeline;
        self.next_page += 1;
        self.load_state = LoadState::Loaded;
        prepended
    }

    /// Append a message at the newest end
    pub(crate) fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub(crate) fn note_unread(&mut self) {
        self.unread += 1;
    }

    pub(crate) fn mark_read(&mut self) {
        self.unread = 0;
    }
}

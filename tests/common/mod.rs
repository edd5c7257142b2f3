//! Scripted ChatApi test double shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use pairchat::client::api::ChatApi;
use pairchat::shared::error::ChatError;
use pairchat::shared::messaging::{UserSummary, WireMessage};

/// ChatApi double that replays queued outcomes and logs every fetch
#[derive(Default)]
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<Vec<WireMessage>, ChatError>>>,
    sends: Mutex<VecDeque<Result<(), ChatError>>>,
    searches: Mutex<VecDeque<Result<Vec<UserSummary>, ChatError>>>,
    fetch_log: Mutex<Vec<(String, u32, u32)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page_ok(&self, page: Vec<WireMessage>) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_page_err(&self, err: ChatError) {
        self.pages.lock().unwrap().push_back(Err(err));
    }

    pub fn push_send(&self, result: Result<(), ChatError>) {
        self.sends.lock().unwrap().push_back(result);
    }

    pub fn push_search(&self, result: Result<Vec<UserSummary>, ChatError>) {
        self.searches.lock().unwrap().push_back(result);
    }

    /// Number of history fetches issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_log.lock().unwrap().len()
    }

    /// Arguments of the most recent history fetch
    pub fn last_fetch(&self) -> Option<(String, u32, u32)> {
        self.fetch_log.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatApi for ScriptedApi {
    async fn fetch_page(
        &self,
        counterpart: &str,
        page: u32,
        page_size: u32,
        _token: &str,
    ) -> Result<Vec<WireMessage>, ChatError> {
        self.fetch_log
            .lock()
            .unwrap()
            .push((counterpart.to_string(), page, page_size));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn send_message(&self, _to: &str, _body: &str, _token: &str) -> Result<(), ChatError> {
        self.sends.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn search_users(
        &self,
        _query: &str,
        _token: &str,
    ) -> Result<Vec<UserSummary>, ChatError> {
        self.searches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn wire(from: &str, to: &str, body: &str) -> WireMessage {
    WireMessage {
        from: from.to_string(),
        to: to.to_string(),
        message: body.to_string(),
        timestamp: None,
    }
}

/// Newest-first page of `n` messages with bodies `{prefix}0` (newest) through
/// `{prefix}{n-1}` (oldest)
pub fn page_of(n: usize, prefix: &str, from: &str, to: &str) -> Vec<WireMessage> {
    (0..n).map(|i| wire(from, to, &format!("{prefix}{i}"))).collect()
}

pub fn user(email: &str) -> UserSummary {
    UserSummary {
        id: Uuid::new_v4(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }
}

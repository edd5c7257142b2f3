//! Search Selector
//!
//! User lookup feeding candidate selection into the roster. The result set
//! is transient: replaced wholesale on every completed search, discarded
//! when a candidate is picked, and never merged across queries.

use crate::client::api::ChatApi;
use crate::shared::error::ChatError;
use crate::shared::messaging::UserSummary;

/// Debounced-by-caller user lookup state
#[derive(Debug, Default)]
pub struct SearchSelector {
    results: Vec<UserSummary>,
    loading: bool,
    generation: u64,
}

impl SearchSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current candidates, in server order
    pub fn results(&self) -> &[UserSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run a lookup for `query` and replace the result set.
    ///
    /// A blank query issues no request and just clears any stale results. On
    /// failure the loading flag is cleared and the error propagates without
    /// retry. A completion superseded by a newer query is discarded.
    pub async fn search<A: ChatApi>(
        &mut self,
        query: &str,
        api: &A,
        token: &str,
    ) -> Result<(), ChatError> {
        let query = query.trim();
        if query.is_empty() {
            self.results.clear();
            return Ok(());
        }

        self.generation += 1;
        let generation = self.generation;
        self.loading = true;

        match api.search_users(query, token).await {
            Ok(users) => {
                if self.generation == generation {
                    tracing::debug!(query, results = users.len(), "search completed");
                    self.results = users;
                    self.loading = false;
                }
                Ok(())
            }
            Err(err) => {
                if self.generation == generation {
                    self.loading = false;
                }
                tracing::warn!(query, "user search failed: {}", err);
                Err(err)
            }
        }
    }

    /// Pick the candidate with `identity`, discarding the rest of the set
    pub fn take(&mut self, identity: &str) -> Option<UserSummary> {
        let position = self.results.iter().position(|user| user.email == identity)?;
        let user = self.results.swap_remove(position);
        self.results.clear();
        self.loading = false;
        Some(user)
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.loading = false;
    }
}

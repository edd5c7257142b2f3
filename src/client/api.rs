//! HTTP Gateway
//!
//! Request/response accessors for the three backend endpoints the core
//! depends on: history pages, message send, and user search. The `ChatApi`
//! trait is the seam tests mock; `HttpChatApi` is the reqwest-backed
//! implementation used in production.

use async_trait::async_trait;
use reqwest::Client;

use crate::shared::error::ChatError;
use crate::shared::messaging::{SendMessageRequest, UserSummary, WireMessage};

/// Gateway to the authenticated backend endpoints
#[async_trait]
pub trait ChatApi {
    /// Fetch one page of past messages with `counterpart`, newest-first.
    ///
    /// A page shorter than `page_size` (possibly empty) means no more pages
    /// exist.
    async fn fetch_page(
        &self,
        counterpart: &str,
        page: u32,
        page_size: u32,
        token: &str,
    ) -> Result<Vec<WireMessage>, ChatError>;

    /// Deliver a message to `to`; success means the server accepted it
    async fn send_message(&self, to: &str, body: &str, token: &str) -> Result<(), ChatError>;

    /// Look up users matching `query`
    async fn search_users(&self, query: &str, token: &str)
        -> Result<Vec<UserSummary>, ChatError>;
}

#[async_trait]
impl<T: ChatApi + Send + Sync> ChatApi for std::sync::Arc<T> {
    async fn fetch_page(
        &self,
        counterpart: &str,
        page: u32,
        page_size: u32,
        token: &str,
    ) -> Result<Vec<WireMessage>, ChatError> {
        (**self).fetch_page(counterpart, page, page_size, token).await
    }

    async fn send_message(&self, to: &str, body: &str, token: &str) -> Result<(), ChatError> {
        (**self).send_message(to, body, token).await
    }

    async fn search_users(
        &self,
        query: &str,
        token: &str,
    ) -> Result<Vec<UserSummary>, ChatError> {
        (**self).search_users(query, token).await
    }
}

/// reqwest-backed gateway
pub struct HttpChatApi {
    server_url: String,
    http: Client,
}

impl HttpChatApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            server_url,
            http: Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// Reject non-2xx responses, mapping 401/403 to auth errors
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ChatError::from_status(status.as_u16(), detail));
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_page(
        &self,
        counterpart: &str,
        page: u32,
        page_size: u32,
        token: &str,
    ) -> Result<Vec<WireMessage>, ChatError> {
        if page == 0 {
            return Err(ChatError::validation("page", "page numbers start at 1"));
        }
        if page_size == 0 {
            return Err(ChatError::validation(
                "page_size",
                "page size must be greater than zero",
            ));
        }

        let url = self.api_url("/api/messages/conversation");
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .query(&[
                ("with", counterpart.to_string()),
                ("page", page.to_string()),
                ("limit", page_size.to_string()),
            ])
            .send()
            .await?;

        let response = Self::check(response).await?;
        response
            .json::<Vec<WireMessage>>()
            .await
            .map_err(|e| ChatError::network(format!("failed to parse history page: {}", e)))
    }

    async fn send_message(&self, to: &str, body: &str, token: &str) -> Result<(), ChatError> {
        let url = self.api_url("/api/messages");
        let request = SendMessageRequest {
            to: to.to_string(),
            message: body.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(&request)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn search_users(
        &self,
        query: &str,
        token: &str,
    ) -> Result<Vec<UserSummary>, ChatError> {
        let url = self.api_url("/api/users/search");
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .query(&[("q", query)])
            .send()
            .await?;

        let response = Self::check(response).await?;
        response
            .json::<Vec<UserSummary>>()
            .await
            .map_err(|e| ChatError::network(format!("failed to parse search results: {}", e)))
    }
}

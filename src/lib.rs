//! Pairchat - Client Core Library
//!
//! Pairchat is the client-side core of a two-party chat application. The
//! backend issues authenticated sessions and persists messages; this library
//! owns the conversation synchronization logic that merges three asynchronous
//! input sources into one ordered, scroll-stable timeline per conversation:
//!
//! - an infinite-scroll backward page fetch (history),
//! - a forward real-time push stream,
//! - locally-originated sent messages.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared across the client
//!   - Message structures, conversation timeline state
//!   - Configuration and error types
//!
//! - **`client`** - The synchronization core
//!   - `api` - HTTP gateway for history, send, and search
//!   - `transport` - push channel adapter
//!   - `engine` - per-conversation timeline state machine
//!   - `roster` - open conversation cards and focus
//!   - `search` - user lookup and candidate selection
//!   - `session` - facade wiring the pieces together
//!
//! # Error Handling
//!
//! All fallible operations return `Result<T, ChatError>`. Errors are
//! recoverable at the caller level; the core never retries on its own and
//! never leaves a conversation's pagination cursor in a partially-advanced
//! state after a failure.
//!
//! # Thread Safety
//!
//! The core is single-threaded and cooperative: every mutating operation
//! takes `&mut self` and runs to completion between suspension points. The
//! only concurrency is the push-channel read task, which hands envelopes to
//! the caller over a channel in receipt order.

/// Shared types and data structures
pub mod shared;

/// Client-side synchronization core
pub mod client;

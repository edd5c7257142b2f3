//! Client-Side Synchronization Core
//!
//! The conversation engine and the components feeding it: the HTTP gateway,
//! the push channel adapter, the roster of open cards, and the user search
//! selector.

pub mod api;
pub mod engine;
pub mod roster;
pub mod search;
pub mod session;
pub mod transport;

//! txfeed - Terminal Account Feed
//!
//! A terminal explorer for an account's transaction history on a
//! GraphQL-indexed EVM chain, with addresses resolved to domain names.

pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod graphql;
pub mod logging;
pub mod resolver;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use app::{App, DomainStatus, FeedView, Screen};
pub use config::Config;
pub use error::{FeedError, FeedResult};

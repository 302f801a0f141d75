//! Cursor-paginated account feeds.
//!
//! A [`FeedSource`] returns raw pages, the [`FeedController`] resolves their
//! addresses, and [`AccountFeedState`] merges the resolved pages.

mod controller;
mod pager;
mod state;
mod types;

pub use controller::{resolve_edges, FeedController, DEFAULT_RESOLVE_CONCURRENCY};
pub use pager::{TablePager, PAGE_SIZES};
pub use state::{AccountFeedState, ApplyOutcome};
pub use types::*;

use async_trait::async_trait;

use crate::error::FeedResult;

/// Remote paginated feed of an account's transactions
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch up to `count` edges after `cursor` (`None` for the first page)
    async fn fetch_page(
        &self,
        kind: FeedKind,
        account: &str,
        cursor: Option<&str>,
        count: u32,
    ) -> FeedResult<RawPage>;
}

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::types::*;
use super::FeedSource;
use crate::error::FeedResult;
use crate::resolver::AddressResolver;

/// Default number of edges resolved concurrently within one page
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 4;

/// Fetches pages from a [`FeedSource`] and resolves their addresses.
///
/// The controller holds no feed state of its own; results are merged by
/// [`super::AccountFeedState::apply`], which also discards results that
/// outlived a reset.
#[derive(Clone)]
pub struct FeedController {
    source: Arc<dyn FeedSource>,
    resolver: AddressResolver,
    concurrency: usize,
}

impl FeedController {
    pub fn new(source: Arc<dyn FeedSource>, resolver: AddressResolver) -> Self {
        Self {
            source,
            resolver,
            concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }

    /// Resolve at most `limit` edges at a time; `1` resolves strictly in sequence
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Fetch one page and resolve every edge's addresses.
    ///
    /// Edges come back in the order the indexer returned them, and only once
    /// the whole page is resolved. Fetch errors propagate unchanged.
    pub async fn fetch_page(&self, request: &PageRequest) -> FeedResult<PageResult> {
        info!(
            account = %request.account,
            kind = ?request.kind,
            cursor = %request.cursor,
            count = request.count,
            "fetching page"
        );

        let page = self
            .source
            .fetch_page(
                request.kind,
                &request.account,
                request.cursor.as_param(),
                request.count,
            )
            .await
            .inspect_err(|e| {
                error!(account = %request.account, cursor = %request.cursor, error = %e, "page fetch failed");
            })?;

        let edges = resolve_edges(&self.resolver, page.edges, self.concurrency).await;

        Ok(PageResult {
            edges,
            page_info: page.page_info,
            total_count: page.total_count,
            account: page.account,
            requested: request.cursor.clone(),
            generation: request.generation,
            merge: request.merge,
        })
    }

    /// Total edge count of one feed, from a single-edge first page.
    ///
    /// Nothing is resolved and no feed state is touched.
    pub async fn fetch_total(&self, account: &str, kind: FeedKind) -> FeedResult<u64> {
        let page = self
            .source
            .fetch_page(kind, account, None, 1)
            .await
            .inspect_err(|e| warn!(account, ?kind, error = %e, "total count fetch failed"))?;
        Ok(page.total_count)
    }
}

/// Resolve a page of edges with bounded concurrency, preserving input order
pub async fn resolve_edges(
    resolver: &AddressResolver,
    edges: Vec<RawEdge>,
    concurrency: usize,
) -> Vec<TransactionEdge> {
    stream::iter(edges)
        .map(|edge| resolver.resolve_edge(edge))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

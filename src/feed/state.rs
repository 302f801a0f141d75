use std::collections::HashSet;
use tracing::{debug, warn};

use super::types::*;

/// Outcome of applying a [`PageResult`] to an [`AccountFeedState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The page was merged; `appended` excludes edges whose cursor was already present
    Merged { appended: usize },
    /// The state was reset after the request was issued; nothing changed
    Stale,
}

/// Loaded edges of one account feed.
///
/// Holds a single account at a time. Edges are kept in arrival order and
/// cursors are unique. Every [`reset`](Self::reset) bumps the generation, and
/// results stamped with an older generation are dropped by
/// [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct AccountFeedState {
    account: String,
    kind: FeedKind,
    edges: Vec<TransactionEdge>,
    cursors: HashSet<String>,
    total_count: u64,
    page_info: PageInfo,
    generation: u64,
    in_flight: bool,
    loaded: bool,
    exhausted: bool,
}

impl AccountFeedState {
    pub fn new(account: impl Into<String>, kind: FeedKind) -> Self {
        Self {
            account: account.into(),
            kind,
            edges: Vec::new(),
            cursors: HashSet::new(),
            total_count: 0,
            page_info: PageInfo::default(),
            generation: 0,
            in_flight: false,
            loaded: false,
            exhausted: false,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn edges(&self) -> &[TransactionEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// At least one page has been applied since the last reset
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether another page can still be requested in append mode
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Append edges in order, skipping cursors that are already present.
    /// Returns how many edges were added.
    pub fn append(&mut self, edges: Vec<TransactionEdge>) -> usize {
        let mut appended = 0;
        for edge in edges {
            if self.cursors.insert(edge.cursor.clone()) {
                self.edges.push(edge);
                appended += 1;
            } else {
                debug!(cursor = %edge.cursor, "skipping duplicate cursor");
            }
        }
        appended
    }

    pub fn replace_page_info(&mut self, info: PageInfo) {
        self.page_info = info;
    }

    /// Clear everything loaded and invalidate requests still in flight
    pub fn reset(&mut self) {
        self.clear_edges();
        self.total_count = 0;
        self.page_info = PageInfo::default();
        self.generation += 1;
        self.in_flight = false;
        self.loaded = false;
        self.exhausted = false;
    }

    /// Point the state at another account or feed kind
    pub fn switch_to(&mut self, account: impl Into<String>, kind: FeedKind) {
        self.account = account.into();
        self.kind = kind;
        self.reset();
    }

    /// Issue a request for `cursor`, or `None` while another fetch is in flight
    pub fn request(&mut self, cursor: Cursor, count: u32) -> Option<PageRequest> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(PageRequest {
            account: self.account.clone(),
            kind: self.kind,
            cursor,
            count,
            generation: self.generation,
            merge: self.kind.merge_mode(),
        })
    }

    /// Request the page after the last one loaded.
    ///
    /// Returns `None` when a fetch is in flight or the feed is exhausted
    /// (`has_next` false or no `last` cursor).
    pub fn next_request(&mut self, count: u32) -> Option<PageRequest> {
        if self.in_flight || self.exhausted {
            return None;
        }
        let cursor = if self.loaded {
            match self.continuation() {
                Some(cursor) => cursor,
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        } else {
            Cursor::Start
        };
        self.request(cursor, count)
    }

    /// Merge a resolved page. Results from an older generation are discarded.
    pub fn apply(&mut self, result: PageResult) -> ApplyOutcome {
        if result.generation != self.generation {
            debug!(
                account = %self.account,
                result_generation = result.generation,
                current_generation = self.generation,
                "discarding stale page"
            );
            return ApplyOutcome::Stale;
        }

        self.in_flight = false;
        self.loaded = true;

        if result.merge == MergeMode::Replace {
            self.clear_edges();
        }

        let repeated = result.merge == MergeMode::Append
            && result.page_info.has_next
            && result.requested.as_param().is_some()
            && result.page_info.last.as_deref() == result.requested.as_param();
        if repeated {
            warn!(
                account = %self.account,
                cursor = %result.requested,
                "indexer returned the requested cursor as next page, stopping"
            );
        }

        let appended = self.append(result.edges);
        self.total_count = result.total_count;
        self.replace_page_info(result.page_info);

        if repeated || self.continuation().is_none() {
            self.exhausted = true;
        }

        ApplyOutcome::Merged { appended }
    }

    /// Release the in-flight slot after a failed fetch. Loaded edges stay.
    /// Returns false if the failure belongs to an older generation.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Next cursor: `pageInfo.last`, falling back to the last edge's cursor
    fn continuation(&self) -> Option<Cursor> {
        if !self.page_info.has_next {
            return None;
        }
        self.page_info.next_cursor().or_else(|| {
            self.edges
                .last()
                .map(|edge| Cursor::At(edge.cursor.clone()))
        })
    }

    fn clear_edges(&mut self) {
        self.edges.clear();
        self.cursors.clear();
    }
}

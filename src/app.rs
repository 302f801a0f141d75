use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info};
use tui_input::Input;

use crate::config::Config;
use crate::error::FeedResult;
use crate::feed::{
    AccountFeedState, AccountSummary, ApplyOutcome, Cursor, FeedController, FeedKind, MergeMode,
    PageRequest, PageResult, TablePager,
};
use crate::graphql::GraphQlClient;
use crate::resolver::{AddressResolver, ContractNameService};

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Feed(FeedView),
    Error(String),
}

/// Domain name lookup for the account shown in the feed header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainStatus {
    Resolving,
    Registered(String),
    NotRegistered,
}

/// A fetch the view is waiting on, or the one that last failed
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrackedFetch {
    cursor: Cursor,
    count: u32,
    /// Pager position to commit once the page arrives
    pager: Option<TablePager>,
}

/// One account's feed screen
#[derive(Debug, Clone)]
pub struct FeedView {
    /// Identifies the view in async messages, also after it moved to history
    pub id: u64,
    pub state: AccountFeedState,
    pub pager: TablePager,
    pub selected_index: usize,
    pub domain: DomainStatus,
    /// Last failed fetch; loaded rows stay visible
    pub error: Option<String>,
    /// Last known total per feed kind, for the tab bar
    pub totals: HashMap<FeedKind, u64>,
    pub summary: Option<AccountSummary>,
    pending: Option<TrackedFetch>,
    failed: Option<TrackedFetch>,
}

impl FeedView {
    pub fn new(id: u64, account: impl Into<String>, per_page: u32) -> Self {
        Self {
            id,
            state: AccountFeedState::new(account, FeedKind::Transactions),
            pager: TablePager::new(per_page),
            selected_index: 0,
            domain: DomainStatus::Resolving,
            error: None,
            totals: HashMap::new(),
            summary: None,
            pending: None,
            failed: None,
        }
    }

    pub fn account(&self) -> &str {
        self.state.account()
    }

    pub fn kind(&self) -> FeedKind {
        self.state.kind()
    }

    pub fn is_table(&self) -> bool {
        self.kind().merge_mode() == MergeMode::Replace
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Remember an issued request; `pager` is committed when it succeeds
    fn track(
        &mut self,
        request: Option<PageRequest>,
        pager: Option<TablePager>,
    ) -> Option<PageRequest> {
        let request = request?;
        self.failed = None;
        self.pending = Some(TrackedFetch {
            cursor: request.cursor.clone(),
            count: request.count,
            pager,
        });
        Some(request)
    }

    /// Request the first page of the current kind
    pub fn first_request(&mut self) -> Option<PageRequest> {
        let request = self.state.next_request(self.pager.per_page());
        self.track(request, None)
    }

    /// Re-issue the last failed fetch unchanged. Without one, reload the
    /// current table page or ask for the next scroll page.
    pub fn retry_request(&mut self) -> Option<PageRequest> {
        if self.state.is_in_flight() {
            return None;
        }
        self.error = None;
        if let Some(fetch) = self.failed.take() {
            let request = self.state.request(fetch.cursor, fetch.count);
            return self.track(request, fetch.pager);
        }
        if self.is_table() && self.state.is_loaded() {
            let cursor = TablePager::offset_cursor(
                self.state.total_count(),
                self.pager.page(),
                self.pager.per_page(),
            );
            let request = self.state.request(cursor, self.pager.per_page());
            self.track(request, None)
        } else {
            self.first_request()
        }
    }

    pub fn switch_kind(&mut self, kind: FeedKind) -> Option<PageRequest> {
        let account = self.account().to_string();
        self.state.switch_to(account, kind);
        self.pager = TablePager::new(self.pager.per_page());
        self.selected_index = 0;
        self.error = None;
        self.pending = None;
        self.failed = None;
        self.first_request()
    }

    /// Fetch the table page `step` picks on a copy of the pager
    fn table_request(
        &mut self,
        step: impl FnOnce(&mut TablePager, u64) -> Option<(Cursor, u32)>,
    ) -> Option<PageRequest> {
        if !self.is_table() || self.state.is_in_flight() {
            return None;
        }
        let mut pager = self.pager;
        let (cursor, count) = step(&mut pager, self.state.total_count())?;
        let request = self.state.request(cursor, count);
        self.track(request, Some(pager))
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.table_request(|pager, total| pager.next_page(total))
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.table_request(|pager, total| pager.prev_page(total))
    }

    /// Move to `size` rows per page. The table refetches at once and keeps
    /// its old size until that page arrives; scroll feeds use the new size
    /// for their next page.
    pub fn set_page_size(&mut self, size: u32) -> Option<PageRequest> {
        if self.state.is_in_flight() {
            return None;
        }
        if !self.is_table() {
            self.pager = TablePager::new(size);
            return None;
        }
        self.table_request(|pager, total| Some(pager.change_page_size(size, total)))
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down; reaching the last loaded row of a scroll feed
    /// asks for the next page.
    pub fn select_next(&mut self) -> Option<PageRequest> {
        let len = self.state.len();
        if len == 0 {
            return None;
        }
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
        if !self.is_table() && self.selected_index + 1 == len && self.state.has_more() {
            let request = self.state.next_request(self.pager.per_page());
            return self.track(request, None);
        }
        None
    }

    /// Address on the other side of the selected row
    pub fn selected_counterparty(&self) -> Option<String> {
        self.state
            .edges()
            .get(self.selected_index)
            .and_then(|edge| edge.counterparty(self.account()))
            .map(String::from)
    }

    fn apply(&mut self, generation: u64, result: FeedResult<PageResult>) {
        match result {
            Ok(page) => {
                let merge = page.merge;
                let summary = page.account.clone();
                if let ApplyOutcome::Merged { appended } = self.state.apply(page) {
                    debug!(account = %self.account(), appended, "page merged");
                    if let Some(pager) = self.pending.take().and_then(|fetch| fetch.pager) {
                        self.pager = pager;
                    }
                    if summary.is_some() {
                        self.summary = summary;
                    }
                    self.error = None;
                    self.totals.insert(self.kind(), self.state.total_count());
                    if merge == MergeMode::Replace {
                        self.selected_index = 0;
                    }
                    self.selected_index = self.selected_index.min(self.state.len().saturating_sub(1));
                }
            }
            Err(e) => {
                if self.state.fail(generation) {
                    self.failed = self.pending.take();
                    self.error = Some(e.to_string());
                }
            }
        }
    }
}

pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub search_input: Input,
    pub setup_input: Input,
    pub selected_history_index: Option<usize>,
    pub should_quit: bool,
    pub controller: Option<FeedController>,
    next_view_id: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let controller = config.graphql_url.as_deref().and_then(|url| {
            build_controller(&config, url)
                .map_err(|e| error!(url, error = %format!("{e:#}"), "cannot build feed controller"))
                .ok()
        });

        Self {
            config,
            screen: Screen::Home,
            history: Vec::new(),
            search_input: Input::default(),
            setup_input: Input::default(),
            selected_history_index: None,
            should_quit: false,
            controller,
            next_view_id: 0,
        }
    }

    /// App backed by an existing controller instead of the configured endpoints
    pub fn with_controller(config: Config, controller: FeedController) -> Self {
        let mut app = Self::new(config);
        app.controller = Some(controller);
        app
    }

    pub fn submit_setup(&mut self) -> Result<(), String> {
        let url = self.setup_input.value().trim().to_string();
        if url.is_empty() {
            return Err("GraphQL URL cannot be empty".to_string());
        }

        match build_controller(&self.config, &url) {
            Ok(controller) => {
                self.controller = Some(controller);
                let _ = self.config.set_graphql(url);
                self.setup_input.reset();
                Ok(())
            }
            Err(e) => Err(format!("{e:#}")),
        }
    }

    pub fn needs_setup(&self) -> bool {
        self.controller.is_none()
    }

    pub fn resolver_enabled(&self) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|c| c.resolver().is_enabled())
    }

    pub fn get_recent_searches(&self) -> &[String] {
        &self.config.recent_searches
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(0) => None, // Wrap to search input
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i >= len - 1 => None, // Wrap to search input
            Some(i) => Some(i + 1),
        };
    }

    pub fn get_selected_history_query(&self) -> Option<String> {
        self.selected_history_index
            .and_then(|i| self.config.recent_searches.get(i).cloned())
    }

    pub fn clear_history_selection(&mut self) {
        self.selected_history_index = None;
    }

    pub fn delete_selected_history(&mut self) {
        if let Some(idx) = self.selected_history_index {
            if idx < self.config.recent_searches.len() {
                self.config.recent_searches.remove(idx);
                let _ = self.config.save();

                if self.config.recent_searches.is_empty() {
                    self.selected_history_index = None;
                } else if idx >= self.config.recent_searches.len() {
                    self.selected_history_index = Some(self.config.recent_searches.len() - 1);
                }
            }
        }
    }

    pub fn submit_search(&mut self) -> Option<String> {
        let value = self.search_input.value();
        if value.is_empty() {
            return None;
        }

        let query = value.to_string();
        self.search_input.reset();
        let _ = self.config.add_recent_search(query.clone());
        Some(query)
    }

    /// Open a fresh feed screen for `account` and return its first request
    pub fn open_account(&mut self, account: &str) -> Option<PageRequest> {
        self.next_view_id += 1;
        let mut view = FeedView::new(self.next_view_id, account, self.config.page_size);
        if !self.resolver_enabled() {
            view.domain = DomainStatus::NotRegistered;
        }
        let request = view.first_request();
        info!(account, view = view.id, "opening account feed");
        self.navigate_to(Screen::Feed(view));
        request
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        if matches!(self.screen, Screen::Feed(_)) {
            self.history.push(self.screen.clone());
        }
        self.screen = screen;
    }

    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            self.screen = prev;
        } else {
            self.go_home();
        }
        true
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.screen = Screen::Home;
    }

    pub fn set_error(&mut self, msg: String) {
        if matches!(self.screen, Screen::Feed(_)) {
            self.history.push(self.screen.clone());
        }
        self.screen = Screen::Error(msg);
    }

    pub fn is_on_home(&self) -> bool {
        matches!(self.screen, Screen::Home)
    }

    pub fn feed_view(&self) -> Option<&FeedView> {
        match &self.screen {
            Screen::Feed(view) => Some(view),
            _ => None,
        }
    }

    pub fn feed_view_mut(&mut self) -> Option<&mut FeedView> {
        match &mut self.screen {
            Screen::Feed(view) => Some(view),
            _ => None,
        }
    }

    /// The view with `id`, on screen or in history
    fn view_by_id(&mut self, id: u64) -> Option<&mut FeedView> {
        std::iter::once(&mut self.screen)
            .chain(self.history.iter_mut())
            .find_map(|screen| match screen {
                Screen::Feed(view) if view.id == id => Some(view),
                _ => None,
            })
    }

    /// Deliver a finished fetch to the view that issued it
    pub fn apply_page(&mut self, view_id: u64, generation: u64, result: FeedResult<PageResult>) {
        match self.view_by_id(view_id) {
            Some(view) => view.apply(generation, result),
            None => debug!(view = view_id, "dropping page for closed view"),
        }
    }

    /// Record a tab count from a count-only fetch. Totals from loaded pages win.
    pub fn set_total(&mut self, view_id: u64, kind: FeedKind, total: u64) {
        if let Some(view) = self.view_by_id(view_id) {
            view.totals.entry(kind).or_insert(total);
        }
    }

    pub fn set_domain(&mut self, view_id: u64, name: Option<String>) {
        if let Some(view) = self.view_by_id(view_id) {
            view.domain = match name {
                Some(name) => DomainStatus::Registered(name),
                None => DomainStatus::NotRegistered,
            };
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(view) = self.feed_view_mut() {
            view.select_prev();
        }
    }

    pub fn select_next(&mut self) -> Option<PageRequest> {
        self.feed_view_mut()?.select_next()
    }

    pub fn cycle_feed_kind(&mut self) -> Option<PageRequest> {
        let view = self.feed_view_mut()?;
        let next = view.kind().next();
        view.switch_kind(next)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.feed_view_mut()?.next_page()
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.feed_view_mut()?.prev_page()
    }

    pub fn grow_page_size(&mut self) -> Option<PageRequest> {
        let view = self.feed_view_mut()?;
        let size = view.pager.larger_page_size()?;
        view.set_page_size(size)
    }

    pub fn shrink_page_size(&mut self) -> Option<PageRequest> {
        let view = self.feed_view_mut()?;
        let size = view.pager.smaller_page_size()?;
        view.set_page_size(size)
    }

    pub fn retry(&mut self) -> Option<PageRequest> {
        self.feed_view_mut()?.retry_request()
    }

    pub fn selected_counterparty(&self) -> Option<String> {
        self.feed_view()?.selected_counterparty()
    }
}

/// Feed controller for `graphql_url`, resolving names when the name
/// service is configured
pub fn build_controller(config: &Config, graphql_url: &str) -> Result<FeedController> {
    let source = Arc::new(GraphQlClient::new(graphql_url)?);
    let resolver = build_resolver(config);

    Ok(FeedController::new(source, resolver).with_concurrency(config.resolve_concurrency))
}

/// Name resolver from the config; a bad name-service setting leaves
/// addresses unresolved instead of blocking the feed
pub fn build_resolver(config: &Config) -> AddressResolver {
    let Some((rpc, reverse, table)) = config.resolver_settings() else {
        return AddressResolver::disabled();
    };
    match ContractNameService::new(rpc, reverse, table) {
        Ok(service) => AddressResolver::new(Arc::new(service)),
        Err(e) => {
            error!(rpc, error = %format!("{e:#}"), "name service disabled");
            AddressResolver::disabled()
        }
    }
}

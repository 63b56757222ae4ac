//! Client-side browsing state for the advocate directory.
//!
//! [`BrowseState`] is the explicit state behind the table: page, page size,
//! search and sort. The server renders links by applying a transition to a
//! copy of the current state, and hydrating clients drive a
//! [`BrowseSession`], which adds search debouncing and request tickets so
//! only the newest response is applied.

use std::fmt::Display;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::advocate::Advocate;
use crate::domain::sort::{Sort, SortField, SortOrder};
use crate::dto::advocates::{AdvocatePage, AdvocatesQuery};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Choices offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    pub current_page: usize,
    pub items_per_page: usize,
    /// What is in the search box right now.
    pub search_term: String,
    /// The term queries are issued with, once typing has settled.
    pub debounced_search_term: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub total_pages: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            debounced_search_term: String::new(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            total_pages: 0,
        }
    }
}

impl BrowseState {
    /// State describing an already loaded page.
    pub fn for_page(page: &AdvocatePage, search: &str, sort: Sort) -> Self {
        Self {
            current_page: page.page,
            items_per_page: page.limit,
            search_term: search.to_string(),
            debounced_search_term: search.to_string(),
            sort_field: sort.field,
            sort_order: sort.order,
            total_pages: page.total_pages,
        }
    }

    pub fn sort(&self) -> Sort {
        Sort::new(self.sort_field, self.sort_order)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Moves one page forward; a no-op on the last page.
    pub fn next(&mut self) {
        if self.can_go_next() {
            self.current_page += 1;
        }
    }

    /// Moves one page back; a no-op on the first page.
    pub fn previous(&mut self) {
        if self.can_go_previous() {
            self.current_page -= 1;
        }
    }

    /// Jumps to `page`; ignored when it is outside `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) {
        if (1..=self.total_pages).contains(&page) {
            self.current_page = page;
        }
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.clamp(1, MAX_PAGE_SIZE);
        self.current_page = 1;
    }

    /// Sorting by the active column flips the order; any other column starts
    /// ascending.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.reversed();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
        self.current_page = 1;
    }

    /// Records a keystroke without triggering a query.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Commits a settled search term. Returns whether the query changed;
    /// surrounding whitespace does not count as a change.
    pub fn apply_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term.trim() == self.debounced_search_term.trim() {
            return false;
        }
        self.debounced_search_term = term;
        self.current_page = 1;
        true
    }

    /// Adopts the page number and page count reported by the server.
    pub fn apply_page(&mut self, page: &AdvocatePage) {
        self.current_page = page.page;
        self.total_pages = page.total_pages;
    }

    /// Query to issue for this state.
    pub fn query(&self) -> AdvocatesQuery {
        let search = self.debounced_search_term.trim();
        AdvocatesQuery {
            page: Some(self.current_page as i64),
            limit: Some(self.items_per_page as i64),
            search: (!search.is_empty()).then(|| search.to_string()),
            sort_field: Some(self.sort_field.as_str().to_string()),
            sort_order: Some(self.sort_order.as_str().to_string()),
        }
    }

    /// URL query string (without `?`) reproducing this state.
    pub fn query_string(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self.query())
    }

    /// Copy of this state with `transition` applied; used to build links.
    #[must_use]
    pub fn with(&self, transition: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        transition(&mut next);
        next
    }
}

/// Holds back search input until it has been stable for the delay.
#[derive(Clone, Debug)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending term and restarts the delay.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending term will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// Releases the pending term once the delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }
}

/// Generation number attached to an issued query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Tracks the most recently issued query so older responses can be dropped.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Browsing state plus the rows currently on screen.
#[derive(Debug)]
pub struct BrowseSession {
    state: BrowseState,
    rows: Vec<Advocate>,
    total: usize,
    debounce: SearchDebounce,
    requests: RequestTracker,
    dirty: bool,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl BrowseSession {
    /// New session; the first [`poll`](Self::poll) issues the initial load.
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            state: BrowseState::default(),
            rows: Vec::new(),
            total: 0,
            debounce: SearchDebounce::new(debounce_delay),
            requests: RequestTracker::default(),
            dirty: true,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn rows(&self) -> &[Advocate] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Next time [`poll`](Self::poll) has work to do, if a search is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn input_search(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        self.state.set_search_term(term.clone());
        self.debounce.input(term, now);
    }

    /// Applies a navigation transition; a query is scheduled if it changed
    /// what should be fetched.
    pub fn update(&mut self, transition: impl FnOnce(&mut BrowseState)) {
        let before = self.state.query();
        transition(&mut self.state);
        if self.state.query() != before {
            self.dirty = true;
        }
    }

    /// Returns the query to send now, tagged with a fresh ticket.
    pub fn poll(&mut self, now: Instant) -> Option<(RequestTicket, AdvocatesQuery)> {
        if let Some(term) = self.debounce.poll(now) {
            if self.state.apply_search(term) {
                self.dirty = true;
            }
        }

        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some((self.requests.issue(), self.state.query()))
    }

    /// Applies a response if it answers the latest query.
    ///
    /// Returns `true` when the rows were replaced. Failures keep the rows
    /// already on screen.
    pub fn receive<E: Display>(
        &mut self,
        ticket: RequestTicket,
        result: Result<AdvocatePage, E>,
    ) -> bool {
        if !self.requests.is_current(ticket) {
            log::debug!("Ignoring stale advocates response #{}", ticket.get());
            return false;
        }

        match result {
            Ok(page) => {
                self.state.apply_page(&page);
                self.total = page.total;
                self.rows = page.advocates;
                true
            }
            Err(err) => {
                log::warn!("Failed to load advocates: {err}");
                false
            }
        }
    }
}

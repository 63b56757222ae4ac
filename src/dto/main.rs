use serde::Serialize;

use crate::browse::BrowseState;
use crate::domain::advocate::Advocate;
use crate::domain::sort::{SortField, SortOrder};
use crate::pagination::{PageControl, Paginated};

/// Sortable table header.
#[derive(Debug, Serialize)]
pub struct ColumnLink {
    pub field: SortField,
    pub label: &'static str,
    /// Link that sorts by this column, toggling when it is already active.
    pub href: String,
    /// Current direction when the table is sorted by this column.
    pub order: Option<SortOrder>,
}

/// Entry in the pagination strip. Ellipses carry no link.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub control: PageControl,
    pub href: Option<String>,
}

/// Option of the page-size selector.
#[derive(Debug, Serialize)]
pub struct PageSizeLink {
    pub size: usize,
    pub href: String,
    pub selected: bool,
}

/// Data required to render the main index template.
#[derive(Serialize)]
pub struct IndexPageData {
    pub advocates: Paginated<Advocate>,
    pub state: BrowseState,
    pub columns: Vec<ColumnLink>,
    pub pages: Vec<PageLink>,
    /// `None` when already on the first page.
    pub previous: Option<String>,
    /// `None` when already on the last page.
    pub next: Option<String>,
    pub page_sizes: Vec<PageSizeLink>,
}

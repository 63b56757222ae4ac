use crate::browse::{BrowseState, PAGE_SIZE_OPTIONS};
use crate::domain::sort::SortField;
use crate::dto::advocates::AdvocatesQuery;
use crate::dto::main::{ColumnLink, IndexPageData, PageLink, PageSizeLink};
use crate::pagination::{PageControl, Paginated};
use crate::repository::AdvocateReader;
use crate::services::advocates::{ListingParams, fetch_page};
use crate::services::{ServiceError, ServiceResult};

fn href(state: &BrowseState) -> ServiceResult<String> {
    let query = state.query_string().map_err(|err| {
        log::error!("Failed to encode browse state: {err}");
        ServiceError::Internal(err.to_string())
    })?;
    Ok(format!("?{query}"))
}

/// Loads the advocates table for the main index page.
///
/// Every link on the page is the current state with one transition applied,
/// so the table is fully navigable without scripts.
pub fn load_index_page<R>(repo: &R, query: &AdvocatesQuery) -> ServiceResult<IndexPageData>
where
    R: AdvocateReader + ?Sized,
{
    let params = ListingParams::from_query(query)?;
    let page = fetch_page(repo, &params)?;
    let state = BrowseState::for_page(&page, &params.search, params.sort);

    let columns = SortField::ALL
        .into_iter()
        .map(|field| -> ServiceResult<ColumnLink> {
            Ok(ColumnLink {
                field,
                label: field.label(),
                href: href(&state.with(|s| s.sort_by(field)))?,
                order: (state.sort_field == field).then_some(state.sort_order),
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let previous = if state.can_go_previous() {
        Some(href(&state.with(BrowseState::previous))?)
    } else {
        None
    };
    let next = if state.can_go_next() {
        Some(href(&state.with(BrowseState::next))?)
    } else {
        None
    };

    // A size outside the presets (e.g. `?limit=7`) is offered too, so the
    // selector shows what is being served.
    let mut sizes = PAGE_SIZE_OPTIONS.to_vec();
    if !sizes.contains(&state.items_per_page) {
        sizes.push(state.items_per_page);
        sizes.sort_unstable();
    }

    let page_sizes = sizes
        .into_iter()
        .map(|size| -> ServiceResult<PageSizeLink> {
            Ok(PageSizeLink {
                size,
                href: href(&state.with(|s| s.set_items_per_page(size)))?,
                selected: size == state.items_per_page,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let advocates = Paginated::new(
        page.advocates,
        page.page,
        page.limit,
        page.total,
        page.total_pages,
    );

    let pages = advocates
        .pages
        .iter()
        .map(|control| -> ServiceResult<PageLink> {
            let link = match control {
                PageControl::Page { number, .. } => {
                    let number = *number;
                    Some(href(&state.with(|s| s.go_to(number)))?)
                }
                PageControl::Ellipsis => None,
            };
            Ok(PageLink {
                control: *control,
                href: link,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(IndexPageData {
        advocates,
        state,
        columns,
        pages,
        previous,
        next,
        page_sizes,
    })
}

//! Advocate listing: validation, clamping and the paged repository read.

use validator::Validate;

use crate::domain::sort::{Sort, SortField, SortOrder};
use crate::dto::advocates::{AdvocatePage, AdvocatesQuery};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::repository::{AdvocateListQuery, AdvocateReader};
use crate::services::{ServiceError, ServiceResult};

/// Listing parameters after validation and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub page: usize,
    pub limit: usize,
    /// Trimmed search term, empty when not filtering.
    pub search: String,
    pub sort: Sort,
}

impl ListingParams {
    /// Rejects unknown sort columns/directions and searches over 100
    /// characters once trimmed; clamps the page to at least 1 and the limit
    /// to `1..=MAX_PAGE_SIZE`.
    pub fn from_query(query: &AdvocatesQuery) -> ServiceResult<Self> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let trimmed = AdvocatesQuery {
            search: Some(search.clone()),
            ..query.clone()
        };
        if let Err(err) = trimmed.validate() {
            log::warn!("Rejected advocates query: {err}");
            return Err(ServiceError::Form(
                "search must be at most 100 characters".to_string(),
            ));
        }

        let field = match query.sort_field.as_deref() {
            None => SortField::default(),
            Some(raw) => raw
                .parse::<SortField>()
                .map_err(|_| ServiceError::InvalidSortField(raw.to_string()))?,
        };
        let order = match query.sort_order.as_deref() {
            None => SortOrder::default(),
            Some(raw) => raw
                .parse::<SortOrder>()
                .map_err(|_| ServiceError::InvalidSortOrder(raw.to_string()))?,
        };

        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64);

        Ok(Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            limit: limit as usize,
            search,
            sort: Sort::new(field, order),
        })
    }
}

/// Loads one page of advocates for already normalized parameters.
pub fn fetch_page<R>(repo: &R, params: &ListingParams) -> ServiceResult<AdvocatePage>
where
    R: AdvocateReader + ?Sized,
{
    let query = AdvocateListQuery::new()
        .search(&params.search)
        .sort(params.sort)
        .paginate(params.page, params.limit);

    let (total, advocates) = repo.list_advocates(query).map_err(|err| {
        log::error!("Failed to list advocates: {err}");
        ServiceError::from(err)
    })?;

    Ok(AdvocatePage {
        advocates,
        total,
        page: params.page,
        limit: params.limit,
        total_pages: total.div_ceil(params.limit),
    })
}

/// Returns the page of advocates described by a raw query.
pub fn list_advocates<R>(repo: &R, query: &AdvocatesQuery) -> ServiceResult<AdvocatePage>
where
    R: AdvocateReader + ?Sized,
{
    let params = ListingParams::from_query(query)?;
    fetch_page(repo, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::seed;

    fn seeded() -> InMemoryRepository {
        InMemoryRepository::from_new(seed::advocates().expect("bundled seed parses"))
            .expect("bundled seed has valid ids")
    }

    fn query(page: i64, limit: i64) -> AdvocatesQuery {
        AdvocatesQuery {
            page: Some(page),
            limit: Some(limit),
            ..AdvocatesQuery::default()
        }
    }

    #[test]
    fn defaults_apply_when_parameters_are_missing() {
        let params = ListingParams::from_query(&AdvocatesQuery::default()).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(params.search, "");
        assert_eq!(params.sort, Sort::new(SortField::FirstName, SortOrder::Asc));
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let params = ListingParams::from_query(&query(-4, 0)).unwrap();
        assert_eq!((params.page, params.limit), (1, 1));

        let params = ListingParams::from_query(&query(2, 5000)).unwrap();
        assert_eq!((params.page, params.limit), (2, MAX_PAGE_SIZE));
    }

    #[test]
    fn invalid_sort_field_is_rejected() {
        let query = AdvocatesQuery {
            sort_field: Some("invalid".to_string()),
            ..AdvocatesQuery::default()
        };
        let result = list_advocates(&seeded(), &query);
        assert!(matches!(result, Err(ServiceError::InvalidSortField(field)) if field == "invalid"));
    }

    #[test]
    fn invalid_sort_order_is_rejected() {
        let query = AdvocatesQuery {
            sort_order: Some("sideways".to_string()),
            ..AdvocatesQuery::default()
        };
        assert!(matches!(
            list_advocates(&seeded(), &query),
            Err(ServiceError::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn overlong_search_is_rejected() {
        let query = AdvocatesQuery {
            search: Some("x".repeat(101)),
            ..AdvocatesQuery::default()
        };
        assert!(matches!(
            list_advocates(&seeded(), &query),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn search_length_is_checked_after_trimming() {
        let padded = AdvocatesQuery {
            search: Some(format!("  {}  ", "x".repeat(100))),
            ..AdvocatesQuery::default()
        };
        let params = ListingParams::from_query(&padded).unwrap();
        assert_eq!(params.search.chars().count(), 100);

        let multibyte = AdvocatesQuery {
            search: Some("é".repeat(100)),
            ..AdvocatesQuery::default()
        };
        assert!(ListingParams::from_query(&multibyte).is_ok());
    }

    #[test]
    fn third_page_of_twenty_five_has_five_items() {
        let page = list_advocates(&seeded(), &query(3, 10)).unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.advocates.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.page, page.limit), (3, 10));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = list_advocates(&seeded(), &query(9, 10)).unwrap();
        assert_eq!(page.total, 25);
        assert!(page.advocates.is_empty());
    }

    #[test]
    fn unmatched_search_returns_empty_page() {
        let query = AdvocatesQuery {
            search: Some("no such advocate".to_string()),
            ..AdvocatesQuery::default()
        };
        let page = list_advocates(&seeded(), &query).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.advocates.is_empty());
    }

    #[test]
    fn sorts_by_experience_descending() {
        let query = AdvocatesQuery {
            limit: Some(100),
            sort_field: Some("yearsOfExperience".to_string()),
            sort_order: Some("desc".to_string()),
            ..AdvocatesQuery::default()
        };
        let page = list_advocates(&seeded(), &query).unwrap();
        let years: Vec<u32> = page
            .advocates
            .iter()
            .map(|a| a.years_of_experience)
            .collect();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[test]
    fn forwards_normalized_query_to_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates()
            .withf(|query| {
                query.search.as_deref() == Some("chicago")
                    && query.sort == Sort::new(SortField::City, SortOrder::Desc)
                    && query.pagination.map(|p| (p.page, p.per_page)) == Some((2, 20))
            })
            .times(1)
            .returning(|_| Ok((41, Vec::new())));

        let query = AdvocatesQuery {
            page: Some(2),
            limit: Some(20),
            search: Some("  Chicago ".to_string()),
            sort_field: Some("city".to_string()),
            sort_order: Some("desc".to_string()),
        };
        let page = list_advocates(&repo, &query).expect("should list");
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn invalid_sort_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates().times(0);
        let query = AdvocatesQuery {
            sort_field: Some("phoneNumber".to_string()),
            ..AdvocatesQuery::default()
        };
        assert!(matches!(
            list_advocates(&repo, &query),
            Err(ServiceError::InvalidSortField(_))
        ));
    }

    #[test]
    fn repository_errors_propagate() {
        let mut repo = MockRepository::new();
        repo.expect_list_advocates()
            .returning(|_| Err(RepositoryError::ConnectionError("down".to_string())));
        assert!(matches!(
            list_advocates(&repo, &AdvocatesQuery::default()),
            Err(ServiceError::Repository(_))
        ));
    }
}

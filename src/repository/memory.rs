//! In-memory advocate store used when no database is configured.

use std::sync::Arc;

use crate::domain::advocate::{Advocate, NewAdvocate};
use crate::domain::types::{AdvocateId, TypeConstraintError};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AdvocateListQuery, AdvocateReader};

/// Immutable snapshot of advocates filtered, sorted and sliced per query.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    advocates: Arc<Vec<Advocate>>,
}

impl InMemoryRepository {
    pub fn new(advocates: Vec<Advocate>) -> Self {
        Self {
            advocates: Arc::new(advocates),
        }
    }

    /// Assigns sequential identifiers starting at 1, in input order.
    pub fn from_new(new_advocates: Vec<NewAdvocate>) -> Result<Self, TypeConstraintError> {
        let advocates = new_advocates
            .into_iter()
            .zip(1..)
            .map(|(advocate, id)| Ok(advocate.into_advocate(AdvocateId::new(id)?)))
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;
        Ok(Self::new(advocates))
    }
}

impl AdvocateReader for InMemoryRepository {
    fn list_advocates(
        &self,
        query: AdvocateListQuery,
    ) -> RepositoryResult<(usize, Vec<Advocate>)> {
        let mut matches: Vec<&Advocate> = match query.search.as_deref() {
            Some(needle) => self
                .advocates
                .iter()
                .filter(|advocate| advocate.matches(needle))
                .collect(),
            None => self.advocates.iter().collect(),
        };

        // Stable sort keeps insertion order for ties, like the SQL id tiebreak.
        matches.sort_by(|a, b| query.sort.compare(a, b));

        let total = matches.len();
        let page: Vec<Advocate> = match query.pagination {
            Some(pagination) => matches
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .cloned()
                .collect(),
            None => matches.into_iter().cloned().collect(),
        };

        Ok((total, page))
    }

    fn count_advocates(&self) -> RepositoryResult<usize> {
        Ok(self.advocates.len())
    }
}

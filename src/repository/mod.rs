use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        advocate::{Advocate, NewAdvocate},
        sort::Sort,
    },
    repository::errors::RepositoryResult,
};

pub mod advocate;
pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use memory::InMemoryRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip; page 0 is treated as page 1.
    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvocateListQuery {
    /// Lower-cased search needle; `None` lists every advocate.
    pub search: Option<String>,
    pub sort: Sort,
    pub pagination: Option<Pagination>,
}

impl AdvocateListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by a case-insensitive substring; blank terms are ignored.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait AdvocateReader {
    /// Returns the total number of matches and the requested slice of them.
    fn list_advocates(&self, query: AdvocateListQuery)
    -> RepositoryResult<(usize, Vec<Advocate>)>;
    fn count_advocates(&self) -> RepositoryResult<usize>;
}

pub trait AdvocateWriter {
    /// Inserts every advocate atomically and returns the stored records.
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<Vec<Advocate>>;
}

/// Diesel-backed repository over the SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Storage backing the directory, chosen once at startup.
#[derive(Clone)]
pub enum AdvocateStore {
    Database(DieselRepository),
    /// Read-only fallback used when no database is configured.
    Memory(InMemoryRepository),
}

impl AdvocateStore {
    /// The writable database, when one is configured.
    pub fn database(&self) -> Option<&DieselRepository> {
        match self {
            AdvocateStore::Database(repo) => Some(repo),
            AdvocateStore::Memory(_) => None,
        }
    }
}

impl AdvocateReader for AdvocateStore {
    fn list_advocates(
        &self,
        query: AdvocateListQuery,
    ) -> RepositoryResult<(usize, Vec<Advocate>)> {
        match self {
            AdvocateStore::Database(repo) => repo.list_advocates(query),
            AdvocateStore::Memory(repo) => repo.list_advocates(query),
        }
    }

    fn count_advocates(&self) -> RepositoryResult<usize> {
        match self {
            AdvocateStore::Database(repo) => repo.count_advocates(),
            AdvocateStore::Memory(repo) => repo.count_advocates(),
        }
    }
}

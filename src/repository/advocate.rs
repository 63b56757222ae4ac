//! Diesel implementation of the advocate repository traits.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::unicode_lower,
    domain::{
        advocate::{Advocate, NewAdvocate},
        sort::{Sort, SortField, SortOrder},
    },
    models::advocate::{Advocate as DbAdvocate, NewAdvocate as DbNewAdvocate},
    repository::{
        AdvocateListQuery, AdvocateReader, AdvocateWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::advocates,
};

type BoxedAdvocates = advocates::BoxedQuery<'static, Sqlite>;

const LIKE_ESCAPE: char = '\\';

/// Escapes `LIKE` wildcards so the needle is matched literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Base query restricted to rows matching the search needle.
///
/// Columns are folded with `unicode_lower` and the needle is already
/// lower-cased, which is the rule [`Advocate::matches`] applies in memory.
fn filtered(search: Option<&str>) -> BoxedAdvocates {
    let mut query = advocates::table.into_boxed();
    if let Some(needle) = search {
        let pattern = like_pattern(needle);
        query = query.filter(
            unicode_lower(advocates::first_name)
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(unicode_lower(advocates::last_name)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE))
                .or(unicode_lower(advocates::city)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE))
                .or(unicode_lower(advocates::degree)
                    .like(pattern)
                    .escape(LIKE_ESCAPE)),
        );
    }
    query
}

macro_rules! order_by {
    ($query:expr, $column:expr, $order:expr) => {
        match $order {
            SortOrder::Asc => $query.order($column.asc()),
            SortOrder::Desc => $query.order($column.desc()),
        }
    };
}

/// Applies the requested ordering; ties keep insertion order.
///
/// Text columns sort on their `unicode_lower` form, compared bytewise like
/// Rust strings.
fn ordered(query: BoxedAdvocates, sort: Sort) -> BoxedAdvocates {
    let query = match sort.field {
        SortField::FirstName => order_by!(query, unicode_lower(advocates::first_name), sort.order),
        SortField::LastName => order_by!(query, unicode_lower(advocates::last_name), sort.order),
        SortField::City => order_by!(query, unicode_lower(advocates::city), sort.order),
        SortField::Degree => order_by!(query, unicode_lower(advocates::degree), sort.order),
        SortField::YearsOfExperience => {
            order_by!(query, advocates::years_of_experience, sort.order)
        }
    };
    query.then_order_by(advocates::id.asc())
}

fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl AdvocateReader for DieselRepository {
    fn list_advocates(
        &self,
        query: AdvocateListQuery,
    ) -> RepositoryResult<(usize, Vec<Advocate>)> {
        let mut conn = self.conn()?;
        let search = query.search.as_deref();

        let total: i64 = filtered(search).count().get_result(&mut conn)?;

        let mut items = ordered(filtered(search), query.sort);
        if let Some(pagination) = query.pagination {
            items = items
                .limit(to_sql_int(pagination.per_page))
                .offset(to_sql_int(pagination.offset()));
        }

        let items = items
            .load::<DbAdvocate>(&mut conn)?
            .into_iter()
            .map(|advocate| Advocate::try_from(advocate).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, items))
    }

    fn count_advocates(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = advocates::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl AdvocateWriter for DieselRepository {
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<Vec<Advocate>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut created = Vec::with_capacity(new_advocates.len());
            for advocate in new_advocates {
                let insertable = DbNewAdvocate::try_from(advocate)?;
                let stored = diesel::insert_into(advocates::table)
                    .values(&insertable)
                    .get_result::<DbAdvocate>(conn)?;
                created.push(Advocate::try_from(stored)?);
            }
            Ok(created)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("york"), "%york%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }
}

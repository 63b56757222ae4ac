//! Sortable columns and sort direction for advocate listings.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::advocate::Advocate;
use crate::domain::types::TypeConstraintError;

/// Column an advocate listing can be ordered by.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    FirstName,
    LastName,
    City,
    Degree,
    YearsOfExperience,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::FirstName,
        SortField::LastName,
        SortField::City,
        SortField::Degree,
        SortField::YearsOfExperience,
    ];

    /// Wire name used in query strings and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::City => "city",
            SortField::Degree => "degree",
            SortField::YearsOfExperience => "yearsOfExperience",
        }
    }

    /// Column header shown in the directory table.
    pub const fn label(self) -> &'static str {
        match self {
            SortField::FirstName => "First Name",
            SortField::LastName => "Last Name",
            SortField::City => "City",
            SortField::Degree => "Degree",
            SortField::YearsOfExperience => "Years of Experience",
        }
    }

    /// Ascending comparison of two advocates on this column.
    ///
    /// Text columns ignore case, so names differing only in case compare
    /// equal; the numeric column compares numerically.
    pub fn compare(self, a: &Advocate, b: &Advocate) -> Ordering {
        match self {
            SortField::FirstName => compare_text(&a.first_name, &b.first_name),
            SortField::LastName => compare_text(&a.last_name, &b.last_name),
            SortField::City => compare_text(&a.city, &b.city),
            SortField::Degree => compare_text(&a.degree, &b.degree),
            SortField::YearsOfExperience => a.years_of_experience.cmp(&b.years_of_experience),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown sort field `{s}`")))
    }
}

/// Direction of an ordering.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort order `{other}`"
            ))),
        }
    }
}

/// Column plus direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn compare(self, a: &Advocate, b: &Advocate) -> Ordering {
        self.order.apply(self.field.compare(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_wire_names_only() {
        assert_eq!("lastName".parse::<SortField>(), Ok(SortField::LastName));
        assert_eq!(
            "yearsOfExperience".parse::<SortField>(),
            Ok(SortField::YearsOfExperience)
        );
        assert!("invalid".parse::<SortField>().is_err());
        assert!("last_name".parse::<SortField>().is_err());
        assert!("LastName".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_order_parses_and_reverses() {
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("down".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(compare_text("alice", "Bob"), Ordering::Less);
        assert_eq!(compare_text("Zoe", "adam"), Ordering::Greater);
    }
}

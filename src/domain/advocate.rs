use serde::{Deserialize, Serialize};

use crate::domain::types::{AdvocateId, CityName, Degree, PersonName, PhoneNumber, Specialty};

/// Directory record for a single advocate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: AdvocateId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub city: CityName,
    pub degree: Degree,
    pub specialties: Vec<Specialty>,
    pub years_of_experience: u32,
    pub phone_number: Option<PhoneNumber>,
}

impl Advocate {
    /// Case-insensitive substring match against the searchable columns.
    ///
    /// `needle` must already be lower-cased. Only names, city and degree take
    /// part so the in-memory and SQL stores agree on what matches.
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.city.as_str(),
            self.degree.as_str(),
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
    }
}

/// Advocate awaiting insertion; the unit of seeding.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvocate {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub city: CityName,
    pub degree: Degree,
    #[serde(default)]
    pub specialties: Vec<Specialty>,
    pub years_of_experience: u32,
    #[serde(default)]
    pub phone_number: Option<PhoneNumber>,
}

impl NewAdvocate {
    /// Materializes the record under the given identifier.
    #[must_use]
    pub fn into_advocate(self, id: AdvocateId) -> Advocate {
        Advocate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            degree: self.degree,
            specialties: self.specialties,
            years_of_experience: self.years_of_experience,
            phone_number: self.phone_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Advocate {
        Advocate {
            id: AdvocateId::new(1).unwrap(),
            first_name: PersonName::new("Jane").unwrap(),
            last_name: PersonName::new("Smith").unwrap(),
            city: CityName::new("Los Angeles").unwrap(),
            degree: Degree::new("PhD").unwrap(),
            specialties: vec![Specialty::new("Trauma & PTSD").unwrap()],
            years_of_experience: 8,
            phone_number: Some(PhoneNumber::new("5559876543").unwrap()),
        }
    }

    #[test]
    fn matches_searchable_columns_case_insensitively() {
        let advocate = sample();
        assert!(advocate.matches("jane"));
        assert!(advocate.matches("smi"));
        assert!(advocate.matches("angeles"));
        assert!(advocate.matches("phd"));
    }

    #[test]
    fn does_not_match_specialties_or_experience() {
        let advocate = sample();
        assert!(!advocate.matches("trauma"));
        assert!(!advocate.matches("8"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["yearsOfExperience"], 8);
        assert_eq!(value["phoneNumber"], "5559876543");
        assert_eq!(value["specialties"][0], "Trauma & PTSD");
    }
}

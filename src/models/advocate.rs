use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::advocate::{Advocate as DomainAdvocate, NewAdvocate as DomainNewAdvocate};
use crate::domain::types::{
    AdvocateId, CityName, Degree, PersonName, PhoneNumber, Specialty, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::advocates)]
/// Diesel model for [`crate::domain::advocate::Advocate`].
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    /// JSON array of specialty labels.
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::advocates)]
/// Insertable form of [`Advocate`].
pub struct NewAdvocate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub city: &'a str,
    pub degree: &'a str,
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: Option<&'a str>,
}

impl TryFrom<Advocate> for DomainAdvocate {
    type Error = TypeConstraintError;

    fn try_from(advocate: Advocate) -> Result<Self, Self::Error> {
        let specialties: Vec<String> = serde_json::from_str(&advocate.specialties)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("specialties: {e}")))?;
        let years_of_experience = u32::try_from(advocate.years_of_experience).map_err(|_| {
            TypeConstraintError::InvalidValue(format!(
                "years of experience: {}",
                advocate.years_of_experience
            ))
        })?;

        Ok(Self {
            id: AdvocateId::try_from(advocate.id)?,
            first_name: PersonName::new(advocate.first_name)?,
            last_name: PersonName::new(advocate.last_name)?,
            city: CityName::new(advocate.city)?,
            degree: Degree::new(advocate.degree)?,
            specialties: specialties
                .into_iter()
                .map(Specialty::new)
                .collect::<Result<_, _>>()?,
            years_of_experience,
            phone_number: advocate.phone_number.map(PhoneNumber::new).transpose()?,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewAdvocate> for NewAdvocate<'a> {
    type Error = TypeConstraintError;

    fn try_from(advocate: &'a DomainNewAdvocate) -> Result<Self, Self::Error> {
        let specialties = serde_json::to_string(&advocate.specialties)
            .map_err(|e| TypeConstraintError::InvalidValue(format!("specialties: {e}")))?;
        let years_of_experience = i32::try_from(advocate.years_of_experience).map_err(|_| {
            TypeConstraintError::InvalidValue(format!(
                "years of experience: {}",
                advocate.years_of_experience
            ))
        })?;

        Ok(Self {
            first_name: advocate.first_name.as_str(),
            last_name: advocate.last_name.as_str(),
            city: advocate.city.as_str(),
            degree: advocate.degree.as_str(),
            specialties,
            years_of_experience,
            phone_number: advocate.phone_number.as_ref().map(PhoneNumber::as_str),
        })
    }
}

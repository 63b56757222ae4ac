use crate::domain::advocate::{Advocate, NewAdvocate};
use crate::repository::{AdvocateReader, AdvocateWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the bundled advocates into an empty database.
///
/// `repo` is `None` when the service runs without a database. A store that
/// already holds advocates is left untouched.
pub fn seed_advocates<R>(repo: Option<&R>, seed: &[NewAdvocate]) -> ServiceResult<Vec<Advocate>>
where
    R: AdvocateReader + AdvocateWriter + ?Sized,
{
    let Some(repo) = repo else {
        log::warn!("Seeding requested without a configured database");
        return Err(ServiceError::DataStoreUnavailable);
    };

    let existing = repo.count_advocates().map_err(|err| {
        log::error!("Failed to count advocates: {err}");
        ServiceError::from(err)
    })?;
    if existing > 0 {
        log::info!("Skipping seed, {existing} advocates already stored");
        return Err(ServiceError::AlreadySeeded);
    }

    let advocates = repo.create_advocates(seed).map_err(|err| {
        log::error!("Failed to seed advocates: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Seeded {} advocates", advocates.len());

    Ok(advocates)
}

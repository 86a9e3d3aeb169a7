use crate::{
    domain::PointsDelta,
    ports::points::{Error, PointsStorePort},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// In-process points store
///
/// Each credit is applied under a single lock, which gives the same add-or-create semantics as
/// a remote atomic counter.
#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    totals: Arc<Mutex<HashMap<String, i64>>>,
}

impl MemoryDatabase {
    /// Current total for a user, or `None` if nothing was ever credited
    pub fn total_points(&self, user_id: &str) -> Result<Option<i64>, Error> {
        Ok(self.totals.lock()?.get(user_id).copied())
    }
}

#[async_trait::async_trait]
impl PointsStorePort for MemoryDatabase {
    async fn credit_points(&self, user_id: String, delta: PointsDelta) -> Result<(), Error> {
        let mut totals = self.totals.lock()?;
        let total = totals.entry(user_id).or_insert(0);
        *total = total.saturating_add(delta.value());

        Ok(())
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Unavailable(Box::new(ErasedPoisonError(err.to_string())))
    }
}

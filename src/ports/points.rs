use crate::domain::PointsDelta;

/// Store holding the running points total of each user
#[mockall::automock]
#[async_trait::async_trait]
pub trait PointsStorePort: Send + Sync {
    /// Atomically add `delta` to the total of `user_id`
    ///
    /// The record is created with `delta` as its total if it does not exist yet. The update is
    /// unconditional: concurrent credits for the same user are all applied.
    async fn credit_points(&self, user_id: String, delta: PointsDelta) -> Result<(), Error>;
}

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Failure to apply a points update
///
/// None of these are retried at this layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store could not be reached or failed internally
    #[error("store unavailable: {0}")]
    Unavailable(Source),

    /// The store rejected the request because of rate or capacity limits
    #[error("store throttled the request: {0}")]
    Throttled(Source),

    /// The credentials in use are not allowed to update the store
    #[error("access denied by store: {0}")]
    AccessDenied(Source),

    /// The table is missing or its key schema does not match the update
    #[error("store schema mismatch: {0}")]
    SchemaMismatch(Source),
}

impl Error {
    /// Short name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Unavailable(_) => "unavailable",
            Error::Throttled(_) => "throttled",
            Error::AccessDenied(_) => "access_denied",
            Error::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

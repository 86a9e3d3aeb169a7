use std::sync::Arc;

pub mod donate;

/// Entry point for the domain operations
///
/// The store handle is shared by every clone, so a single `DomainLogic` built at startup can serve
/// all concurrent requests.
pub struct DomainLogic<D> {
    database: Arc<D>,
}

impl<D> DomainLogic<D> {
    pub fn new(database: Arc<D>) -> Self {
        Self { database }
    }
}

impl<D> Clone for DomainLogic<D> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request body could not be decoded into a donation
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("points store error: {0}")]
    Store(#[from] crate::ports::points::Error),
}

use crate::{
    domain::PointsDelta,
    ports::points::{Error, PointsStorePort},
};
use aws_sdk_dynamodb::{
    error::{ProvideErrorMetadata, SdkError},
    operation::update_item::UpdateItemError,
    types::AttributeValue,
    Client,
};
use tracing::debug;

/// Partition key of the user profiles table
pub const KEY_ATTRIBUTE: &str = "UserID";
/// Counter attribute holding the running total
pub const POINTS_ATTRIBUTE: &str = "TotalPoints";

/// Points store backed by a DynamoDB table
///
/// The client is built once at startup and cloned cheaply; it holds no per-request state.
#[derive(Clone, Debug)]
pub struct DynamoDbDatabase {
    client: Client,
    table_name: String,
}

impl DynamoDbDatabase {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait::async_trait]
impl PointsStorePort for DynamoDbDatabase {
    async fn credit_points(&self, user_id: String, delta: PointsDelta) -> Result<(), Error> {
        debug!(table = %self.table_name, %delta, "issuing atomic add");

        // `ADD` creates the item and the attribute when missing, so no read is needed first.
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(user_id))
            .update_expression(format!("ADD {POINTS_ATTRIBUTE} :p"))
            .expression_attribute_values(":p", AttributeValue::N(delta.to_string()))
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }
}

/// Map an SDK failure onto the store error kinds
fn classify<R>(err: SdkError<UpdateItemError, R>) -> Error
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let kind = match &err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            UpdateItemError::ProvisionedThroughputExceededException(_)
            | UpdateItemError::RequestLimitExceeded(_) => Kind::Throttled,
            UpdateItemError::ResourceNotFoundException(_) => Kind::SchemaMismatch,
            other => kind_from_code(other.code()),
        },
        _ => Kind::Unavailable,
    };

    let source = Box::new(err);
    match kind {
        Kind::Unavailable => Error::Unavailable(source),
        Kind::Throttled => Error::Throttled(source),
        Kind::AccessDenied => Error::AccessDenied(source),
        Kind::SchemaMismatch => Error::SchemaMismatch(source),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Kind {
    Unavailable,
    Throttled,
    AccessDenied,
    SchemaMismatch,
}

/// Classify errors the SDK does not model, based on their error code
fn kind_from_code(code: Option<&str>) -> Kind {
    match code {
        Some("ThrottlingException") => Kind::Throttled,
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "MissingAuthenticationTokenException"
            | "ExpiredTokenException",
        ) => Kind::AccessDenied,
        Some("ValidationException") => Kind::SchemaMismatch,
        _ => Kind::Unavailable,
    }
}

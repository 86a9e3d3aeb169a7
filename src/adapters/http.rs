//! HTTP front for the donation command
//!
//! Every outcome is reported as a plain-text body. Store failures of any kind share a single
//! 500 response, the detailed kind is logged by the command.

use crate::{
    commands::{
        donate::{DonateRequest, DonateResponse},
        DomainLogic, Error,
    },
    ports::points::PointsStorePort,
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower::ServiceExt;
use tracing::warn;

pub const INVALID_BODY: &str = "Invalid request body";
pub const UPDATE_FAILED: &str = "Error updating points";

pub fn router<D>(logic: DomainLogic<D>) -> Router
where
    D: PointsStorePort + 'static,
{
    Router::new()
        .route("/donate", post(donate_handler::<D>))
        .with_state(logic)
}

async fn donate_handler<D>(State(logic): State<DomainLogic<D>>, body: Bytes) -> Response
where
    D: PointsStorePort + 'static,
{
    respond(logic.oneshot(DonateRequest::new(body)).await).into_response()
}

/// Assemble the status and body for a donation outcome
pub fn respond(res: Result<DonateResponse, Error>) -> (StatusCode, String) {
    match res {
        Ok(res) => (
            StatusCode::OK,
            format!("Thành công! Bạn nhận được {} điểm.", res.points),
        ),
        Err(Error::MalformedInput(err)) => {
            warn!("rejecting donation body: {err}");
            (StatusCode::BAD_REQUEST, INVALID_BODY.to_string())
        }
        Err(Error::Store(_)) => (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED.to_string()),
    }
}

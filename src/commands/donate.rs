use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{DonationRequest, PointsDelta},
    ports::points::PointsStorePort,
};
use bytes::Bytes;
use tower::Service;
use tracing::{error, field, info, info_span, Instrument, Span};
use uuid::Uuid;

use super::{DomainLogic, Error};

/// Raw donation submission, as received from the transport
pub struct DonateRequest {
    body: Bytes,
}

impl DonateRequest {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct DonateResponse {
    pub user_id: String,
    /// Points credited by this donation
    pub points: PointsDelta,
}

impl<D> Service<DonateRequest> for DomainLogic<D>
where
    D: PointsStorePort + 'static,
{
    type Response = DonateResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: DonateRequest) -> Self::Future {
        let database = self.database.clone();
        let span = info_span!(
            "donation",
            donation_id = %Uuid::new_v4(),
            user_id = field::Empty
        );
        Box::pin(
            async move {
                let donation = DonationRequest::from_json(&req.body)?;
                Span::current().record("user_id", field::display(&donation.user_id));
                let points = donation.points();

                if let Err(err) = database
                    .credit_points(donation.user_id.clone(), points)
                    .await
                {
                    error!(kind = err.kind(), "failed to credit points: {err}");
                    return Err(Error::Store(err));
                }

                info!(%points, "points credited");
                Ok::<_, Error>(DonateResponse {
                    user_id: donation.user_id,
                    points,
                })
            }
            .instrument(span),
        )
    }
}

//! HTTP surface of the search service.
//!
//! One interesting route: `GET /flights` aggregates all sources under the
//! configured deadline, deduplicates, and answers with the `{"flights"}`
//! envelope. Clients never observe individual upstream failures; the only
//! error they can see is a generic 500 on an unexpected internal fault.

use crate::aggregator::Aggregator;
use crate::dedupe::dedupe;
use crate::errors::SearchError;
use crate::model::{ErrorResponse, FlightsResponse};
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use shared::http::{json_body, make_error_response, text_body};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

type ServiceResponse = Response<BoxBody<Bytes, SearchError>>;

#[derive(Clone)]
pub struct SearchService {
    aggregator: Arc<Aggregator>,
    deadline: Duration,
}

impl SearchService {
    pub fn new(aggregator: Arc<Aggregator>, deadline: Duration) -> Self {
        Self {
            aggregator,
            deadline,
        }
    }
}

impl<B> Service<Request<B>> for SearchService
where
    B: Send + 'static,
{
    type Response = ServiceResponse;
    type Error = SearchError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let aggregator = self.aggregator.clone();
        let deadline = self.deadline;

        Box::pin(async move {
            let response = match (req.method(), req.uri().path()) {
                (&Method::GET, "/flights") => handle_flights(&aggregator, deadline).await,
                (&Method::GET, "/health") => Response::new(text_body("ok\n")),
                _ => make_error_response(StatusCode::NOT_FOUND),
            };
            Ok(response)
        })
    }
}

/// Aggregate, dedupe, wrap. Stays within the deadline plus a small slack
/// for dedup and serialization.
async fn handle_flights(aggregator: &Aggregator, deadline: Duration) -> ServiceResponse {
    let start = Instant::now();

    let flights = dedupe(aggregator.search(deadline).await);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(elapsed_ms, count = flights.len(), "handled flights request");
    metrics::histogram!("search.flights.duration_ms").record(elapsed_ms as f64);

    match json_body(&FlightsResponse { flights }) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(error) => server_error(format!("failed to serialize response: {error}")),
    }
}

fn json_response(status: StatusCode, body: BoxBody<Bytes, SearchError>) -> ServiceResponse {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Generic error envelope for faults no client is expected to see.
fn server_error(message: String) -> ServiceResponse {
    tracing::error!(message, "internal error");

    match json_body(&ErrorResponse { message }) {
        Ok(body) => json_response(StatusCode::INTERNAL_SERVER_ERROR, body),
        Err(_) => make_error_response(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

//! Flight search aggregation service.
//!
//! Queries every configured upstream flight source concurrently, returns
//! within a strict deadline with whatever arrived, and deduplicates
//! itineraries by canonical key before answering.

pub mod aggregator;
pub mod config;
pub mod dedupe;
pub mod errors;
pub mod fetch;
pub mod model;
pub mod service;

#[cfg(test)]
pub(crate) mod testutils;

use crate::aggregator::Aggregator;
use crate::service::SearchService;
use std::sync::Arc;

/// Resolves the listen port, builds the aggregator, and serves until the
/// listener fails. Config problems (including an unresolvable port) surface
/// here, before anything is bound.
pub async fn run(config: config::Config) -> Result<(), errors::SearchError> {
    config.validate()?;
    let port = config.resolve_port()?;

    let aggregator = Arc::new(Aggregator::from_config(&config));
    let service = SearchService::new(aggregator, config.deadline());

    shared::http::run_http_service(&config.listener.host, port, service).await
}

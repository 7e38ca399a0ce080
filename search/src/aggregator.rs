//! Concurrent multi-source fetching with a hard deadline.
//!
//! Every configured source is queried in parallel; the race between "all
//! tasks settled" and the deadline timer decides when to answer. Upstream
//! failures never escape this module: a failing source simply contributes
//! nothing. Bounded latency dominates completeness here, so a fully failed
//! or fully timed-out aggregation is indistinguishable from "no flights
//! found".

use crate::config::{Config, SourceConfig};
use crate::fetch::fetch_itineraries;
use crate::model::Itinerary;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;

pub struct Aggregator {
    /// Shared connection pool across all sources and requests
    client: reqwest::Client,
    sources: Vec<SourceConfig>,
    /// Rendered `user:pass` credential shared by all sources
    credential: Option<String>,
}

impl Aggregator {
    pub fn new(sources: Vec<SourceConfig>, credential: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            sources,
            credential,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.sources.clone(),
            config.credentials.as_ref().map(|c| c.as_credential()),
        )
    }

    /// Fetches itineraries from every source concurrently, returning within
    /// `deadline` with whatever has arrived by then.
    ///
    /// Successful sources contribute their itineraries in source-launch
    /// order; failed sources contribute nothing. Sources still outstanding
    /// when the deadline fires are aborted so their sockets are released
    /// promptly, and their eventual results are discarded. Never fails:
    /// absence of data is an empty list.
    pub async fn search(&self, deadline: Duration) -> Vec<Itinerary> {
        let mut join_set = JoinSet::new();

        for (index, source) in self.sources.iter().enumerate() {
            let client = self.client.clone();
            let url = source.url.to_string();
            let name = source.name.clone();
            let credential = self.credential.clone();

            join_set.spawn(async move {
                let outcome = fetch_itineraries(&client, &url, credential.as_deref()).await;
                (index, name, outcome)
            });
        }

        let timer = sleep(deadline);
        tokio::pin!(timer);

        // Request-scoped accumulation buffer; only this loop writes to it,
        // completions fan in through the join set. It only ever grows.
        let mut collected: Vec<(usize, Vec<Itinerary>)> = Vec::new();

        // The pinned timer is polled by exactly one select arm and dropped
        // exactly once when this loop exits, whichever branch wins.
        loop {
            tokio::select! {
                _ = &mut timer => {
                    let abandoned = join_set.len();
                    if abandoned > 0 {
                        tracing::warn!(abandoned, "deadline reached, abandoning outstanding sources");
                        metrics::counter!("search.aggregate.abandoned_sources")
                            .increment(abandoned as u64);
                    }
                    join_set.abort_all();
                    break;
                }
                joined = join_set.join_next() => match joined {
                    Some(Ok((index, name, Ok(flights)))) => {
                        tracing::debug!(source = %name, count = flights.len(), "source responded");
                        collected.push((index, flights));
                    }
                    Some(Ok((_, name, Err(error)))) => {
                        // The failure stops here; the caller only ever sees
                        // whatever the healthy sources produced.
                        tracing::warn!(source = %name, error = %error, "source fetch failed");
                        metrics::counter!("search.source.failure", "source" => name).increment(1);
                    }
                    Some(Err(join_error)) => {
                        tracing::error!(error = %join_error, "source task panicked");
                    }
                    None => break,
                }
            }
        }

        // Source-launch order, independent of completion order.
        collected.sort_by_key(|(index, _)| *index);
        collected
            .into_iter()
            .flat_map(|(_, flights)| flights)
            .collect()
    }
}

//! Single-source itinerary fetching.
//!
//! One GET against a configured source URL, with optional basic auth.
//! Status and content-type are validated before the body is consumed; on
//! either failure the body is still drained in full so the connection goes
//! back to the client's pool.

use crate::errors::FetchError;
use crate::model::{Itinerary, SourceResponse};
use http::StatusCode;
use http::header::CONTENT_TYPE;

/// Fetches the `flights` list from one upstream source.
///
/// `credential`, when present, must be in `user:pass` form and is sent as
/// HTTP basic auth. Argument validation happens before any network activity.
pub async fn fetch_itineraries(
    client: &reqwest::Client,
    url: &str,
    credential: Option<&str>,
) -> Result<Vec<Itinerary>, FetchError> {
    if url.is_empty() {
        return Err(FetchError::InvalidArgument("missing source URL".into()));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| FetchError::InvalidArgument(format!("invalid source URL {url:?}: {e}")))?;

    // Scheme picks the transport (plain vs TLS); anything else never
    // reaches the network.
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidArgument(format!(
            "unsupported URL scheme {:?}",
            parsed.scheme()
        )));
    }

    let basic_auth = credential
        .map(|raw| {
            raw.split_once(':').ok_or_else(|| {
                FetchError::InvalidArgument(
                    "credential must be in 'username:password' form".into(),
                )
            })
        })
        .transpose()?;

    let mut request = client.get(parsed);
    if let Some((username, password)) = basic_auth {
        request = request.basic_auth(username, Some(password));
    }

    let mut response = request.send().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        drain(response).await;
        return Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.starts_with("application/json") {
        drain(response).await;
        return Err(FetchError::UnexpectedContentType {
            url: url.to_string(),
            content_type,
        });
    }

    // Consume the body chunk by chunk as it arrives instead of waiting for
    // the whole payload, then parse the concatenated document once.
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?
    {
        body.extend_from_slice(&chunk);
    }

    let parsed: SourceResponse =
        serde_json::from_slice(&body).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!(url, count = parsed.flights.len(), "fetched itineraries");
    Ok(parsed.flights)
}

/// Consumes the remainder of a response body so the pooled connection is
/// released. Read errors at this point are irrelevant.
async fn drain(mut response: reqwest::Response) {
    while let Ok(Some(_)) = response.chunk().await {}
}

//! HTTP client for lookups against a sibling service.
//!
//! Every lookup resolves to one of three outcomes. A 404 (or any other 4xx)
//! means the peer answered and the entity does not exist; transport errors,
//! timeouts, 5xx answers and undecodable bodies mean the peer could not be
//! consulted. Callers decide what each outcome means for their request.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{metrics::PEER_LOOKUPS_TOTAL, CommonError};

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unreachable(String),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::NotFound => "not_found",
            Lookup::Unreachable(_) => "unreachable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PeerClient {
    name: &'static str,
    base_url: Url,
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new(name: &'static str, base_url: &str, timeout: Duration) -> Result<Self, CommonError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| CommonError::InvalidPeerUrl(format!("{name}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CommonError::InvalidPeerUrl(format!("{name}: {base_url}")));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CommonError::HttpClient(e.to_string()))?;
        Ok(Self { name, base_url, http })
    }

    /// Base URL joined with `segments`, each one percent-encoded.
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `segments` under the base URL and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Lookup<T> {
        let url = self.url_for(segments);
        let result = self.fetch(url.clone()).await;
        PEER_LOOKUPS_TOTAL
            .with_label_values(&[self.name, result.outcome()])
            .inc();
        match &result {
            Lookup::Unreachable(reason) => {
                warn!(peer = self.name, %url, %reason, "peer lookup failed")
            }
            other => debug!(peer = self.name, %url, outcome = other.outcome(), "peer lookup"),
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Lookup<T> {
        let resp = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => return Lookup::Unreachable(e.to_string()),
        };
        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status.is_client_error() {
            return Lookup::NotFound;
        }
        if !status.is_success() {
            return Lookup::Unreachable(format!("status {status}"));
        }
        match resp.json::<T>().await {
            Ok(v) => Lookup::Found(v),
            Err(e) => Lookup::Unreachable(format!("decode: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    async fn spawn_peer() -> anyhow::Result<String> {
        let app = Router::new()
            .route(
                "/items/:id",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "1" => Ok(Json(json!({"id": 1}))),
                        "boom" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
                        "bad" => Ok(Json(json!({"nope": true}))),
                        _ => Err(AxumStatus::NOT_FOUND),
                    }
                }),
            )
            .route(
                "/echo/:email",
                get(|Path(email): Path<String>| async move { Json(json!({"id": email.len()})) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}"))
    }

    #[tokio::test]
    async fn lookup_outcomes_follow_status() -> anyhow::Result<()> {
        let base = spawn_peer().await?;
        let peer = PeerClient::new("test", &base, Duration::from_secs(2))?;

        assert_eq!(peer.get_json::<Item>(&["items", "1"]).await, Lookup::Found(Item { id: 1 }));
        assert_eq!(peer.get_json::<Item>(&["items", "2"]).await, Lookup::NotFound);
        assert_eq!(peer.get_json::<Item>(&["items", "boom"]).await.outcome(), "unreachable");
        assert_eq!(peer.get_json::<Item>(&["items", "bad"]).await.outcome(), "unreachable");
        Ok(())
    }

    #[tokio::test]
    async fn segments_are_percent_encoded() -> anyhow::Result<()> {
        let base = spawn_peer().await?;
        let peer = PeerClient::new("test", &format!("{base}/"), Duration::from_secs(2))?;
        let url = peer.url_for(&["echo", "a b@x.cl"]);
        assert!(url.as_str().ends_with("/echo/a%20b@x.cl"));
        let got = peer.get_json::<Item>(&["echo", "a b@x.cl"]).await;
        assert_eq!(got, Lookup::Found(Item { id: 8 }));
        Ok(())
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() -> anyhow::Result<()> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);
        let peer = PeerClient::new("test", &format!("http://{addr}"), Duration::from_millis(500))?;
        assert_eq!(peer.get_json::<Item>(&["items", "1"]).await.outcome(), "unreachable");
        Ok(())
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(PeerClient::new("test", "not a url", Duration::from_secs(1)).is_err());
        assert!(PeerClient::new("test", "mailto:x@y.cl", Duration::from_secs(1)).is_err());
    }
}

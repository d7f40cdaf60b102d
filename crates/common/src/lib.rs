use thiserror::Error;

pub mod types;
pub mod utils;
pub mod json;
pub mod metrics;
pub mod peer;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("invalid peer url: {0}")]
    InvalidPeerUrl(String),
    #[error("http client error: {0}")]
    HttpClient(String),
}

//! Views of entities owned by sibling services, and the lookups that fetch
//! them. Callers treat `NotFound` and `Unreachable` alike; the distinction
//! survives in logs and the `peer_lookups_total` counter.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

pub use common::peer::Lookup;

/// A user as published by the users service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl RemoteUser {
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }
}

/// A product as published by the catalog. Only the presence of the image
/// matters here, so its payload is skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
    #[serde(default)]
    pub imagen: Option<IgnoredAny>,
}

impl RemoteProduct {
    pub fn has_image(&self) -> bool {
        self.imagen.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAnimal {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub is_adoptado: Option<bool>,
}

impl RemoteAnimal {
    pub fn is_adoptado(&self) -> bool {
        self.is_adoptado.unwrap_or(false)
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Lookup<RemoteUser>;
    async fn find_by_id(&self, id: i64) -> Lookup<RemoteUser>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_product(&self, id: i64) -> Lookup<RemoteProduct>;
    /// Public URL of a product image, stored as a snapshot on cart lines.
    fn image_url(&self, id: i64) -> String;
}

#[async_trait]
pub trait AnimalRegistry: Send + Sync {
    async fn find_animal(&self, id: i64) -> Lookup<RemoteAnimal>;
}

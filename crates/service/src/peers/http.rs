use std::time::Duration;

use async_trait::async_trait;

use common::peer::{Lookup, PeerClient};
use common::CommonError;

use super::{AnimalRegistry, ProductCatalog, RemoteAnimal, RemoteProduct, RemoteUser, UserDirectory};

/// Users service over HTTP (`/auth/usuario/correo/{email}`, `/auth/usuarios/{id}`).
pub struct HttpUserDirectory {
    client: PeerClient,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CommonError> {
        Ok(Self { client: PeerClient::new("usuarios", base_url, timeout)? })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_by_email(&self, email: &str) -> Lookup<RemoteUser> {
        let email = email.trim();
        if email.is_empty() {
            return Lookup::NotFound;
        }
        self.client.get_json(&["auth", "usuario", "correo", email]).await
    }

    async fn find_by_id(&self, id: i64) -> Lookup<RemoteUser> {
        self.client.get_json(&["auth", "usuarios", &id.to_string()]).await
    }
}

/// Catalog service over HTTP (`/productos/{id}`).
pub struct HttpProductCatalog {
    client: PeerClient,
}

impl HttpProductCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CommonError> {
        Ok(Self { client: PeerClient::new("catalogo", base_url, timeout)? })
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn find_product(&self, id: i64) -> Lookup<RemoteProduct> {
        self.client.get_json(&["productos", &id.to_string()]).await
    }

    fn image_url(&self, id: i64) -> String {
        self.client.url_for(&["productos", &id.to_string(), "imagen"]).to_string()
    }
}

/// Animals service over HTTP (`/animales/{id}`).
pub struct HttpAnimalRegistry {
    client: PeerClient,
}

impl HttpAnimalRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CommonError> {
        Ok(Self { client: PeerClient::new("animales", base_url, timeout)? })
    }
}

#[async_trait]
impl AnimalRegistry for HttpAnimalRegistry {
    async fn find_animal(&self, id: i64) -> Lookup<RemoteAnimal> {
        self.client.get_json(&["animales", &id.to_string()]).await
    }
}

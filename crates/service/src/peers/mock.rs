//! In-memory peers for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::IgnoredAny;

use super::*;

#[derive(Default)]
pub struct MockUserDirectory {
    users: HashMap<i64, RemoteUser>,
    unreachable: bool,
}

impl MockUserDirectory {
    pub fn with_user(mut self, id: i64, email: &str, is_admin: bool) -> Self {
        self.users.insert(
            id,
            RemoteUser {
                id,
                nombre: format!("Usuario {id}"),
                email: email.into(),
                telefono: None,
                is_admin: Some(is_admin),
            },
        );
        self
    }

    /// Every lookup fails as if the peer were down.
    pub fn unreachable() -> Self {
        Self { users: HashMap::new(), unreachable: true }
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_by_email(&self, email: &str) -> Lookup<RemoteUser> {
        if self.unreachable {
            return Lookup::Unreachable("mock down".into());
        }
        match self.users.values().find(|u| u.email == email) {
            Some(u) => Lookup::Found(u.clone()),
            None => Lookup::NotFound,
        }
    }

    async fn find_by_id(&self, id: i64) -> Lookup<RemoteUser> {
        if self.unreachable {
            return Lookup::Unreachable("mock down".into());
        }
        match self.users.get(&id) {
            Some(u) => Lookup::Found(u.clone()),
            None => Lookup::NotFound,
        }
    }
}

#[derive(Default)]
pub struct MockProductCatalog {
    products: HashMap<i64, RemoteProduct>,
}

impl MockProductCatalog {
    pub fn with_product(mut self, id: i64, nombre: &str, precio: f64, has_image: bool) -> Self {
        let imagen = has_image.then_some(IgnoredAny);
        self.products.insert(id, RemoteProduct { id, nombre: nombre.into(), precio, imagen });
        self
    }
}

#[async_trait]
impl ProductCatalog for MockProductCatalog {
    async fn find_product(&self, id: i64) -> Lookup<RemoteProduct> {
        match self.products.get(&id) {
            Some(p) => Lookup::Found(p.clone()),
            None => Lookup::NotFound,
        }
    }

    fn image_url(&self, id: i64) -> String {
        format!("http://catalogo.test/productos/{id}/imagen")
    }
}

#[derive(Default)]
pub struct MockAnimalRegistry {
    animals: HashMap<i64, RemoteAnimal>,
}

impl MockAnimalRegistry {
    pub fn with_animal(mut self, id: i64, nombre: &str, is_adoptado: bool) -> Self {
        self.animals
            .insert(id, RemoteAnimal { id, nombre: nombre.into(), is_adoptado: Some(is_adoptado) });
        self
    }
}

#[async_trait]
impl AnimalRegistry for MockAnimalRegistry {
    async fn find_animal(&self, id: i64) -> Lookup<RemoteAnimal> {
        match self.animals.get(&id) {
            Some(a) => Lookup::Found(a.clone()),
            None => Lookup::NotFound,
        }
    }
}

use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Animal, AnimalFields, AnimalFilter, AnimalInput};
use super::repository::AnimalRepository;
use crate::admin::{require_admin, AdminAuthorizer};
use crate::errors::ServiceError;
use crate::input::{opt_bool, opt_email, opt_text_value};

pub const ANIMAL_NO_ENCONTRADO: &str = "Animal no encontrado";

pub struct AnimalService {
    repo: Arc<dyn AnimalRepository>,
    admin: Arc<dyn AdminAuthorizer>,
}

fn fields(input: &AnimalInput) -> Result<AnimalFields, ServiceError> {
    let get = |v: &Option<serde_json::Value>| opt_text_value(v).unwrap_or_default();
    let f = AnimalFields {
        nombre: get(&input.nombre),
        especie: get(&input.especie),
        raza: get(&input.raza),
        edad: get(&input.edad),
        descripcion: get(&input.descripcion),
    };
    models::animal::validate_fields(&f.nombre, &f.especie, &f.raza, &f.descripcion, &f.edad)?;
    Ok(f)
}

impl AnimalService {
    pub fn new(repo: Arc<dyn AnimalRepository>, admin: Arc<dyn AdminAuthorizer>) -> Self {
        Self { repo, admin }
    }

    pub async fn list(&self, filter: AnimalFilter) -> Result<Vec<Animal>, ServiceError> {
        Ok(self.repo.list(filter).await?.into_iter().map(Animal::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Animal, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Animal::from)
            .ok_or_else(|| ServiceError::not_found(ANIMAL_NO_ENCONTRADO))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: AnimalInput) -> Result<Animal, ServiceError> {
        require_admin(
            self.admin.as_ref(),
            opt_email(&input.email_admin),
            "No tienes permisos para agregar animales",
        )
        .await?;
        let created = self.repo.create(fields(&input)?, None).await?;
        info!(animal_id = created.id, nombre = %created.nombre, "animal_created");
        Ok(created.into())
    }

    /// Full replacement; `isAdoptado` falls back to false when absent.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: AnimalInput) -> Result<Animal, ServiceError> {
        require_admin(
            self.admin.as_ref(),
            opt_email(&input.email_admin),
            "No tienes permisos para actualizar animales",
        )
        .await?;
        let f = fields(&input)?;
        let is_adoptado = opt_bool(&input.is_adoptado).unwrap_or(false);
        self.repo
            .update(id, f, is_adoptado)
            .await?
            .map(Animal::from)
            .ok_or_else(|| ServiceError::not_found(ANIMAL_NO_ENCONTRADO))
    }

    #[instrument(skip(self, imagen), fields(bytes = imagen.len()))]
    pub async fn update_image(
        &self,
        id: i64,
        email_admin: Option<&str>,
        imagen: Vec<u8>,
    ) -> Result<(), ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para actualizar imágenes")
            .await?;
        if imagen.is_empty() {
            return Err(ServiceError::validation("Error al leer la imagen"));
        }
        if !self.repo.set_imagen(id, imagen).await? {
            return Err(ServiceError::not_found(ANIMAL_NO_ENCONTRADO));
        }
        Ok(())
    }

    pub async fn image(&self, id: i64) -> Result<Vec<u8>, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .and_then(|a| a.imagen)
            .ok_or_else(|| ServiceError::not_found("Imagen no encontrada"))
    }

    #[instrument(skip(self))]
    pub async fn mark_adopted(&self, id: i64, email_admin: Option<&str>) -> Result<(), ServiceError> {
        require_admin(
            self.admin.as_ref(),
            email_admin,
            "No tienes permisos para marcar animales como adoptados",
        )
        .await?;
        if !self.repo.mark_adoptado(id).await? {
            return Err(ServiceError::not_found(ANIMAL_NO_ENCONTRADO));
        }
        info!(animal_id = id, "animal_adopted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64, email_admin: Option<&str>) -> Result<(), ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para eliminar animales")
            .await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ANIMAL_NO_ENCONTRADO));
        }
        Ok(())
    }
}

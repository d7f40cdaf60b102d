use std::sync::Arc;

use tracing::{info, instrument};

use models::formulario_adopcion::validate_answers;

use super::domain::{Estado, FormFilter, FormInput, FormularioAdopcion, NewFormulario, ReviewInput};
use super::repository::{FormRepository, SOLICITUD_PENDIENTE};
use crate::admin::{require_admin, AdminAuthorizer};
use crate::errors::ServiceError;
use crate::input::{opt_bool, opt_email, opt_text_value, text};
use crate::peers::{AnimalRegistry, UserDirectory};

pub const FORMULARIO_NO_ENCONTRADO: &str = "Formulario no encontrado";
pub const ESTADO_INVALIDO: &str = "Estado inválido. Use: PENDIENTE, APROBADO o RECHAZADO";

pub struct FormService {
    repo: Arc<dyn FormRepository>,
    users: Arc<dyn UserDirectory>,
    animals: Arc<dyn AnimalRegistry>,
    admin: Arc<dyn AdminAuthorizer>,
}

impl FormService {
    pub fn new(
        repo: Arc<dyn FormRepository>,
        users: Arc<dyn UserDirectory>,
        animals: Arc<dyn AnimalRegistry>,
        admin: Arc<dyn AdminAuthorizer>,
    ) -> Self {
        Self { repo, users, animals, admin }
    }

    async fn listed(&self, filter: FormFilter) -> Result<Vec<FormularioAdopcion>, ServiceError> {
        Ok(self.repo.list(filter).await?.into_iter().map(FormularioAdopcion::from).collect())
    }

    pub async fn list_all(&self, email_admin: Option<&str>) -> Result<Vec<FormularioAdopcion>, ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para ver todos los formularios")
            .await?;
        self.listed(FormFilter::All).await
    }

    pub async fn get(&self, id: i64) -> Result<FormularioAdopcion, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(FormularioAdopcion::from)
            .ok_or_else(|| ServiceError::not_found(FORMULARIO_NO_ENCONTRADO))
    }

    pub async fn by_usuario(&self, usuario_id: i64) -> Result<Vec<FormularioAdopcion>, ServiceError> {
        self.listed(FormFilter::Usuario(usuario_id)).await
    }

    pub async fn by_animal(&self, animal_id: i64) -> Result<Vec<FormularioAdopcion>, ServiceError> {
        self.listed(FormFilter::Animal(animal_id)).await
    }

    pub async fn by_estado(
        &self,
        estado: &str,
        email_admin: Option<&str>,
    ) -> Result<Vec<FormularioAdopcion>, ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para filtrar formularios").await?;
        let estado = Estado::parse(estado).ok_or_else(|| ServiceError::validation(ESTADO_INVALIDO))?;
        self.listed(FormFilter::Estado(estado)).await
    }

    /// Answers first, then the references: the user must exist, the animal
    /// must exist and still be available, and the pair must not already have
    /// a pending form.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        usuario_id: i64,
        animal_id: i64,
        input: FormInput,
    ) -> Result<FormularioAdopcion, ServiceError> {
        let direccion = text(&input.direccion).unwrap_or_default();
        let tipo_vivienda = text(&input.tipo_vivienda).unwrap_or_default();
        let mallas = opt_bool(&input.tiene_mallas_ventanas);
        let departamento = opt_bool(&input.vive_en_departamento);
        let otros = opt_bool(&input.tiene_otros_animales);
        validate_answers(direccion, tipo_vivienda, mallas, departamento, otros)?;

        if self.users.find_by_id(usuario_id).await.found().is_none() {
            return Err(ServiceError::rejected("Usuario no encontrado"));
        }
        let animal = self
            .animals
            .find_animal(animal_id)
            .await
            .found()
            .ok_or_else(|| ServiceError::rejected("Animal no encontrado"))?;
        if animal.is_adoptado() {
            return Err(ServiceError::rejected("El animal ya está adoptado"));
        }
        if self.repo.exists_pending(usuario_id, animal_id).await? {
            return Err(ServiceError::rejected(SOLICITUD_PENDIENTE));
        }

        let row = self
            .repo
            .create(NewFormulario {
                usuario_id,
                animal_id,
                direccion: direccion.to_string(),
                tipo_vivienda: tipo_vivienda.to_string(),
                tiene_mallas_ventanas: mallas.unwrap_or_default(),
                vive_en_departamento: departamento.unwrap_or_default(),
                tiene_otros_animales: otros.unwrap_or_default(),
                motivo_adopcion: text(&input.motivo_adopcion).map(str::to_string),
                fecha_creacion: chrono::Utc::now().into(),
            })
            .await?;
        info!(form_id = row.id, usuario_id, animal_id, "adoption_form_created");
        Ok(row.into())
    }

    pub async fn approve(&self, id: i64, input: ReviewInput) -> Result<FormularioAdopcion, ServiceError> {
        require_admin(self.admin.as_ref(), opt_email(&input.email_admin), "No tienes permisos para aprobar formularios")
            .await?;
        self.review(id, Estado::Aprobado, opt_text_value(&input.comentarios)).await
    }

    pub async fn reject(&self, id: i64, input: ReviewInput) -> Result<FormularioAdopcion, ServiceError> {
        require_admin(self.admin.as_ref(), opt_email(&input.email_admin), "No tienes permisos para rechazar formularios")
            .await?;
        self.review(id, Estado::Rechazado, opt_text_value(&input.comentarios)).await
    }

    // The current status is overwritten as-is; reviewing twice re-applies.
    #[instrument(skip(self, comentarios))]
    async fn review(
        &self,
        id: i64,
        estado: Estado,
        comentarios: Option<String>,
    ) -> Result<FormularioAdopcion, ServiceError> {
        let row = self
            .repo
            .review(id, estado, comentarios, chrono::Utc::now().into())
            .await?
            .ok_or_else(|| ServiceError::not_found(FORMULARIO_NO_ENCONTRADO))?;
        info!(form_id = id, estado = row.estado.as_str(), "adoption_form_reviewed");
        Ok(row.into())
    }

    pub async fn delete(&self, id: i64, email_admin: Option<&str>) -> Result<(), ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para eliminar formularios").await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(FORMULARIO_NO_ENCONTRADO));
        }
        Ok(())
    }
}

use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{
    CancelOutcome, CrearOrdenInput, ItemOrden, ItemOrdenInput, NewItemOrden, NewOrden, Orden, OrdenDetalle,
};
use super::repository::OrderRepository;
use crate::errors::ServiceError;
use crate::input::{required_f64, required_i64, text};
use crate::peers::UserDirectory;

pub const ORDEN_NO_ENCONTRADA: &str = "Orden no encontrada";

fn parse_item(raw: &ItemOrdenInput) -> Result<NewItemOrden, ServiceError> {
    let cantidad = required_i64(&raw.cantidad, "cantidad")?;
    Ok(NewItemOrden {
        producto_id: required_i64(&raw.producto_id, "productoId")?,
        producto_nombre: text(&raw.producto_nombre)
            .ok_or_else(|| ServiceError::validation("El campo productoNombre es obligatorio"))?
            .to_string(),
        producto_precio: required_f64(&raw.producto_precio, "productoPrecio")?,
        cantidad: i32::try_from(cantidad)
            .map_err(|_| ServiceError::validation("El campo cantidad debe ser numérico"))?,
        image_url: text(&raw.image_url).map(str::to_string),
    })
}

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    users: Arc<dyn UserDirectory>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { repo, users }
    }

    async fn require_user(&self, usuario_id: i64) -> Result<(), ServiceError> {
        match self.users.find_by_id(usuario_id).await.found() {
            Some(_) => Ok(()),
            None => Err(ServiceError::rejected("Usuario no encontrado")),
        }
    }

    async fn require_order(&self, id: i64) -> Result<Orden, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Orden::from)
            .ok_or_else(|| ServiceError::rejected(ORDEN_NO_ENCONTRADA))
    }

    pub async fn list_all(&self) -> Result<Vec<Orden>, ServiceError> {
        Ok(self.repo.list(None).await?.into_iter().map(Orden::from).collect())
    }

    pub async fn by_usuario(&self, usuario_id: i64) -> Result<Vec<Orden>, ServiceError> {
        self.require_user(usuario_id).await?;
        Ok(self.repo.list(Some(usuario_id)).await?.into_iter().map(Orden::from).collect())
    }

    /// Plain lookup: a missing order is `NotFound` here, unlike the
    /// item and detail views which reject the request.
    pub async fn get(&self, id: i64) -> Result<Orden, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Orden::from)
            .ok_or_else(|| ServiceError::not_found(ORDEN_NO_ENCONTRADA))
    }

    pub async fn items(&self, id: i64) -> Result<Vec<ItemOrden>, ServiceError> {
        self.require_order(id).await?;
        Ok(self.repo.items(id).await?.into_iter().map(ItemOrden::from).collect())
    }

    pub async fn detail(&self, id: i64) -> Result<OrdenDetalle, ServiceError> {
        let orden = self.require_order(id).await?;
        let items: Vec<ItemOrden> = self.repo.items(id).await?.into_iter().map(ItemOrden::from).collect();
        Ok(OrdenDetalle { orden, cantidad_items: items.len(), items })
    }

    #[instrument(skip(self, input))]
    pub async fn checkout(&self, input: CrearOrdenInput) -> Result<Orden, ServiceError> {
        let usuario_id = required_i64(&input.usuario_id, "usuarioId")?;
        let total = required_f64(&input.total, "total")?;
        let items = input
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(parse_item)
            .collect::<Result<Vec<_>, _>>()?;

        self.require_user(usuario_id).await?;
        if items.is_empty() {
            return Err(ServiceError::rejected("La orden debe tener al menos un item"));
        }
        let lines = items.len();
        let row = self
            .repo
            .checkout(NewOrden { usuario_id, total, created_at: chrono::Utc::now().into() }, items)
            .await?;
        info!(orden_id = row.id, usuario_id, total, lines, "order_created");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i64) -> Result<Orden, ServiceError> {
        match self.repo.cancel(id).await? {
            CancelOutcome::Cancelled(row) => {
                info!(orden_id = id, "order_cancelled");
                Ok(row.into())
            }
            CancelOutcome::AlreadyCancelled => Err(ServiceError::rejected("La orden ya está cancelada")),
            CancelOutcome::Missing => Err(ServiceError::rejected(ORDEN_NO_ENCONTRADA)),
        }
    }
}

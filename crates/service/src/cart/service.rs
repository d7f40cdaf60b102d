use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{
    total, AgregarInput, CantidadInput, CarritoDetalle, ItemCarrito, NewCartLine, QuantityChange,
};
use super::repository::CartRepository;
use crate::errors::ServiceError;
use crate::input::required_i64;
use crate::peers::{ProductCatalog, RemoteUser, UserDirectory};

pub const ITEM_NO_ENCONTRADO: &str = "Item no encontrado";

fn cantidad(v: &Option<serde_json::Value>) -> Result<i32, ServiceError> {
    i32::try_from(required_i64(v, "cantidad")?)
        .map_err(|_| ServiceError::validation("El campo cantidad debe ser numérico"))
}

pub struct CartService {
    repo: Arc<dyn CartRepository>,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ProductCatalog>,
}

impl CartService {
    pub fn new(
        repo: Arc<dyn CartRepository>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self { repo, users, catalog }
    }

    async fn require_user(&self, usuario_id: i64) -> Result<RemoteUser, ServiceError> {
        self.users
            .find_by_id(usuario_id)
            .await
            .found()
            .ok_or_else(|| ServiceError::rejected("Usuario no encontrado"))
    }

    async fn lines(&self, usuario_id: i64) -> Result<Vec<ItemCarrito>, ServiceError> {
        Ok(self.repo.list_by_usuario(usuario_id).await?.into_iter().map(ItemCarrito::from).collect())
    }

    pub async fn items(&self, usuario_id: i64) -> Result<Vec<ItemCarrito>, ServiceError> {
        self.require_user(usuario_id).await?;
        self.lines(usuario_id).await
    }

    pub async fn detail(&self, usuario_id: i64) -> Result<CarritoDetalle, ServiceError> {
        let usuario = self.require_user(usuario_id).await?;
        let items = self.lines(usuario_id).await?;
        Ok(CarritoDetalle { usuario, total: total(&items), cantidad_items: items.len(), items })
    }

    pub async fn total(&self, usuario_id: i64) -> Result<f64, ServiceError> {
        self.require_user(usuario_id).await?;
        Ok(total(&self.lines(usuario_id).await?))
    }

    /// Validate user and product, then add to the user's line for that
    /// product (created on first add).
    #[instrument(skip(self, input))]
    pub async fn add(&self, input: AgregarInput) -> Result<ItemCarrito, ServiceError> {
        let usuario_id = required_i64(&input.usuario_id, "usuarioId")?;
        let producto_id = required_i64(&input.producto_id, "productoId")?;
        let cantidad = cantidad(&input.cantidad)?;
        if cantidad < 1 {
            return Err(ServiceError::validation("La cantidad debe ser mayor a 0"));
        }
        self.require_user(usuario_id).await?;
        let producto = self
            .catalog
            .find_product(producto_id)
            .await
            .found()
            .ok_or_else(|| ServiceError::rejected("Producto no encontrado"))?;
        let image_url = producto.has_image().then(|| self.catalog.image_url(producto_id));
        let row = self
            .repo
            .upsert_add(NewCartLine {
                usuario_id,
                producto_id,
                producto_nombre: producto.nombre,
                producto_precio: producto.precio,
                cantidad,
                image_url,
            })
            .await?;
        info!(usuario_id, producto_id, cantidad = row.cantidad, "cart_item_added");
        Ok(row.into())
    }

    /// Zero or negative removes the line.
    #[instrument(skip(self, input))]
    pub async fn set_quantity(&self, item_id: i64, input: CantidadInput) -> Result<QuantityChange, ServiceError> {
        let cantidad = cantidad(&input.cantidad)?;
        if cantidad <= 0 {
            return if self.repo.delete(item_id).await? {
                Ok(QuantityChange::Removed)
            } else {
                Err(ServiceError::not_found(ITEM_NO_ENCONTRADO))
            };
        }
        self.repo
            .set_cantidad(item_id, cantidad)
            .await?
            .map(|row| QuantityChange::Updated(row.into()))
            .ok_or_else(|| ServiceError::not_found(ITEM_NO_ENCONTRADO))
    }

    pub async fn remove(&self, item_id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(item_id).await? {
            return Err(ServiceError::not_found(ITEM_NO_ENCONTRADO));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, usuario_id: i64) -> Result<(), ServiceError> {
        self.require_user(usuario_id).await?;
        let removed = self.repo.delete_by_usuario(usuario_id).await?;
        info!(usuario_id, removed, "cart_cleared");
        Ok(())
    }
}

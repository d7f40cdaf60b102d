use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Producto, ProductoFields, ProductoFilter, ProductoInput};
use super::repository::ProductoRepository;
use crate::admin::{require_admin, AdminAuthorizer};
use crate::errors::ServiceError;
use crate::input::{opt_email, opt_text_value};

pub const PRODUCTO_NO_ENCONTRADO: &str = "Producto no encontrado";

pub struct CatalogService {
    repo: Arc<dyn ProductoRepository>,
    admin: Arc<dyn AdminAuthorizer>,
}

/// Required text first, then price presence, parse and floor.
fn fields(input: &ProductoInput) -> Result<ProductoFields, ServiceError> {
    let get = |v: &Option<serde_json::Value>| opt_text_value(v).unwrap_or_default();
    let (nombre, descripcion, categoria) =
        (get(&input.nombre), get(&input.descripcion), get(&input.categoria));
    models::producto::validate_fields(&nombre, &descripcion, &categoria)?;
    let raw = match &input.precio {
        None | Some(serde_json::Value::Null) => {
            return Err(ServiceError::validation("El precio es obligatorio"))
        }
        Some(v) => v,
    };
    let precio = common::json::as_f64(raw)
        .ok_or_else(|| ServiceError::validation("El precio debe ser un número válido"))?;
    models::producto::validate_precio(precio)?;
    Ok(ProductoFields { nombre, descripcion, categoria, precio })
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ProductoRepository>, admin: Arc<dyn AdminAuthorizer>) -> Self {
        Self { repo, admin }
    }

    pub async fn list(&self, filter: ProductoFilter) -> Result<Vec<Producto>, ServiceError> {
        Ok(self.repo.list(filter).await?.into_iter().map(Producto::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Producto, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Producto::from)
            .ok_or_else(|| ServiceError::not_found(PRODUCTO_NO_ENCONTRADO))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ProductoInput) -> Result<Producto, ServiceError> {
        require_admin(
            self.admin.as_ref(),
            opt_email(&input.email_admin),
            "No tienes permisos para crear productos",
        )
        .await?;
        let created = self.repo.create(fields(&input)?, None).await?;
        info!(producto_id = created.id, nombre = %created.nombre, "product_created");
        Ok(created.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ProductoInput) -> Result<Producto, ServiceError> {
        require_admin(
            self.admin.as_ref(),
            opt_email(&input.email_admin),
            "No tienes permisos para actualizar productos",
        )
        .await?;
        let f = fields(&input)?;
        self.repo
            .update(id, f)
            .await?
            .map(Producto::from)
            .ok_or_else(|| ServiceError::not_found(PRODUCTO_NO_ENCONTRADO))
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
            return Err(ServiceError::validation("Error al procesar la imagen"));
        }
        if !self.repo.set_imagen(id, imagen).await? {
            return Err(ServiceError::not_found(PRODUCTO_NO_ENCONTRADO));
        }
        Ok(())
    }

    pub async fn image(&self, id: i64) -> Result<Vec<u8>, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .and_then(|p| p.imagen)
            .ok_or_else(|| ServiceError::not_found("Imagen no encontrada"))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64, email_admin: Option<&str>) -> Result<(), ServiceError> {
        require_admin(self.admin.as_ref(), email_admin, "No tienes permisos para eliminar productos")
            .await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(PRODUCTO_NO_ENCONTRADO));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::StaticAdminAuthorizer;
    use crate::catalog::repository::mock::MockProductoRepository;
    use serde_json::json;

    const ADMIN: &str = "admin@amilimetros.cl";

    fn service() -> CatalogService {
        CatalogService::new(
            Arc::new(MockProductoRepository::default()),
            Arc::new(StaticAdminAuthorizer { admins: vec![ADMIN.into()] }),
        )
    }

    fn collar(precio: serde_json::Value) -> ProductoInput {
        ProductoInput {
            email_admin: Some(json!(ADMIN)),
            nombre: Some(json!("Collar")),
            descripcion: Some(json!("Nylon")),
            categoria: Some(json!("Accesorios")),
            precio: Some(precio),
        }
    }

    #[tokio::test]
    async fn price_accepts_numeric_strings() {
        let svc = service();
        let p = svc.create(collar(json!("6990"))).await.unwrap();
        assert_eq!(p.precio, 6990.0);
    }

    #[tokio::test]
    async fn price_rules() {
        let svc = service();
        let cases = [
            (json!(null), "El precio es obligatorio"),
            (json!("barato"), "El precio debe ser un número válido"),
            (json!(999), "El precio mínimo es 1000 pesos"),
        ];
        for (precio, msg) in cases {
            assert_eq!(svc.create(collar(precio)).await, Err(ServiceError::validation(msg)));
        }
        assert!(svc.list(ProductoFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_admin_is_denied_before_validation() {
        let svc = service();
        let input = ProductoInput { email_admin: Some(json!("ana@correo.cl")), ..collar(json!(1)) };
        assert_eq!(
            svc.create(input).await,
            Err(ServiceError::forbidden("No tienes permisos para crear productos"))
        );
    }

    #[tokio::test]
    async fn update_filter_and_delete() {
        let svc = service();
        let p = svc.create(collar(json!(6990))).await.unwrap();
        let updated = svc.update(p.id, collar(json!(7990.5))).await.unwrap();
        assert_eq!(updated.precio, 7990.5);
        assert_eq!(svc.list(ProductoFilter::Categoria("Accesorios".into())).await.unwrap().len(), 1);
        assert_eq!(svc.list(ProductoFilter::NombreContains("COL".into())).await.unwrap().len(), 1);
        assert_eq!(
            svc.update(42, collar(json!(7990))).await,
            Err(ServiceError::not_found(PRODUCTO_NO_ENCONTRADO))
        );
        svc.delete(p.id, Some(ADMIN)).await.unwrap();
        assert_eq!(svc.get(p.id).await, Err(ServiceError::not_found(PRODUCTO_NO_ENCONTRADO)));
    }
}

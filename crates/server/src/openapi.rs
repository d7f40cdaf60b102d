//! OpenAPI documents, one per service. The `*Doc` / `*Request` types mirror
//! the JSON the handlers exchange and exist only for the schema.
#![allow(dead_code)]

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest { pub email_admin: String }

// usuarios

#[derive(Serialize, ToSchema)]
pub struct RegisterRequest { pub nombre: String, pub email: String, pub telefono: String, pub contrasena: String }

#[derive(Serialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub contrasena: String }

#[derive(Serialize, ToSchema)]
pub struct LoginResponseDoc { pub message: String, pub success: bool }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioDoc { pub id: i64, pub nombre: String, pub email: String, pub telefono: String, pub is_admin: bool }

// animales

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRequest {
    pub email_admin: String,
    pub nombre: String,
    pub especie: String,
    pub raza: String,
    pub edad: String,
    pub descripcion: String,
    pub is_adoptado: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDoc {
    pub id: i64,
    pub nombre: String,
    pub especie: String,
    pub raza: String,
    pub edad: String,
    pub descripcion: String,
    /// Base64
    pub imagen: Option<String>,
    pub is_adoptado: bool,
}

// productos

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductoRequest {
    pub email_admin: String,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    /// Number or numeric string, at least 1000.
    pub precio: f64,
}

#[derive(Serialize, ToSchema)]
pub struct ProductoDoc {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    /// Base64
    pub imagen: Option<String>,
    pub categoria: String,
}

// carrito

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgregarRequest { pub usuario_id: i64, pub producto_id: i64, pub cantidad: i32 }

#[derive(Serialize, ToSchema)]
pub struct CantidadRequest { pub cantidad: i32 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarritoDoc {
    pub id: i64,
    pub usuario_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarritoDetalleDoc {
    pub usuario: UsuarioDoc,
    pub items: Vec<ItemCarritoDoc>,
    pub total: f64,
    pub cantidad_items: usize,
}

#[derive(Serialize, ToSchema)]
pub struct TotalDoc { pub total: f64 }

// formularios

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormularioRequest {
    pub direccion: String,
    pub tipo_vivienda: String,
    pub tiene_mallas_ventanas: bool,
    pub vive_en_departamento: bool,
    pub tiene_otros_animales: bool,
    pub motivo_adopcion: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRequest { pub email_admin: String, pub comentarios: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormularioDoc {
    pub id: i64,
    pub usuario_id: i64,
    pub animal_id: i64,
    pub direccion: String,
    pub tipo_vivienda: String,
    pub tiene_mallas_ventanas: bool,
    pub vive_en_departamento: bool,
    pub tiene_otros_animales: bool,
    pub motivo_adopcion: Option<String>,
    /// PENDIENTE, APROBADO or RECHAZADO
    pub estado: String,
    pub comentarios_admin: Option<String>,
    pub fecha_creacion: String,
    pub fecha_revision: Option<String>,
}

// ordenes

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrdenRequest {
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearOrdenRequest { pub usuario_id: i64, pub total: f64, pub items: Vec<ItemOrdenRequest> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenDoc {
    pub id: i64,
    pub usuario_id: i64,
    pub total: f64,
    pub created_at: String,
    /// Completada or Cancelada
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrdenDoc {
    pub id: i64,
    pub orden_id: i64,
    pub producto_id: i64,
    pub producto_nombre: String,
    pub producto_precio: f64,
    pub cantidad: i32,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenDetalleDoc { pub orden: OrdenDoc, pub items: Vec<ItemOrdenDoc>, pub cantidad_items: usize }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::usuarios::register,
        crate::routes::usuarios::login,
        crate::routes::usuarios::list,
        crate::routes::usuarios::get_by_id,
        crate::routes::usuarios::get_by_email,
        crate::routes::usuarios::remove,
    ),
    components(schemas(HealthResponse, AdminRequest, RegisterRequest, LoginRequest, LoginResponseDoc, UsuarioDoc)),
    tags((name = "health"), (name = "usuarios"))
)]
pub struct UsuariosApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::animales::list,
        crate::routes::animales::disponibles,
        crate::routes::animales::adoptados,
        crate::routes::animales::buscar,
        crate::routes::animales::por_especie,
        crate::routes::animales::get_one,
        crate::routes::animales::create,
        crate::routes::animales::update,
        crate::routes::animales::subir_imagen,
        crate::routes::animales::imagen,
        crate::routes::animales::adoptar,
        crate::routes::animales::remove,
    ),
    components(schemas(HealthResponse, AnimalRequest, AnimalDoc)),
    tags((name = "health"), (name = "animales"))
)]
pub struct AnimalesApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::productos::list,
        crate::routes::productos::buscar,
        crate::routes::productos::por_categoria,
        crate::routes::productos::get_one,
        crate::routes::productos::create,
        crate::routes::productos::update,
        crate::routes::productos::subir_imagen,
        crate::routes::productos::imagen,
        crate::routes::productos::remove,
    ),
    components(schemas(HealthResponse, ProductoRequest, ProductoDoc)),
    tags((name = "health"), (name = "productos"))
)]
pub struct CatalogoApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::carrito::items,
        crate::routes::carrito::detalles,
        crate::routes::carrito::total,
        crate::routes::carrito::agregar,
        crate::routes::carrito::cantidad,
        crate::routes::carrito::quitar,
        crate::routes::carrito::vaciar,
    ),
    components(schemas(
        HealthResponse, ErrorDoc, AgregarRequest, CantidadRequest, ItemCarritoDoc, CarritoDetalleDoc,
        UsuarioDoc, TotalDoc
    )),
    tags((name = "health"), (name = "carrito"))
)]
pub struct CarritoApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::formularios::list,
        crate::routes::formularios::get_one,
        crate::routes::formularios::por_usuario,
        crate::routes::formularios::por_animal,
        crate::routes::formularios::por_estado,
        crate::routes::formularios::adoptar,
        crate::routes::formularios::aprobar,
        crate::routes::formularios::rechazar,
        crate::routes::formularios::remove,
    ),
    components(schemas(HealthResponse, FormularioRequest, RevisionRequest, FormularioDoc)),
    tags((name = "health"), (name = "formularios"))
)]
pub struct FormulariosApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ordenes::list,
        crate::routes::ordenes::por_usuario,
        crate::routes::ordenes::get_one,
        crate::routes::ordenes::items,
        crate::routes::ordenes::detalles,
        crate::routes::ordenes::crear,
        crate::routes::ordenes::cancelar,
    ),
    components(schemas(
        HealthResponse, ErrorDoc, ItemOrdenRequest, CrearOrdenRequest, OrdenDoc, ItemOrdenDoc, OrdenDetalleDoc
    )),
    tags((name = "health"), (name = "ordenes"))
)]
pub struct OrdenesApi;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_service_documents_its_paths() {
        let users = UsuariosApi::openapi();
        assert!(users.paths.paths.contains_key("/auth/usuario/correo/{email}"));
        let forms = FormulariosApi::openapi();
        assert!(forms.paths.paths.contains_key("/formularios/adoptar/{usuarioId}/{animalId}"));
        let orders = OrdenesApi::openapi();
        assert!(orders.paths.paths.contains_key("/ordenes/{id}/cancelar"));
        assert!(orders.paths.paths.contains_key("/health"));
    }
}

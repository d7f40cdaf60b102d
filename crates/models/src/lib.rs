pub mod errors;
pub mod db;
pub mod usuario;
pub mod animal;
pub mod producto;
pub mod item_carrito;
pub mod formulario_adopcion;
pub mod orden;
pub mod item_orden;

pub(crate) fn require(value: &str, message: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(message.into()));
    }
    Ok(())
}

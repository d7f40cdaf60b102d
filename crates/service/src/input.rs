//! Readers for loosely typed request bodies. Numeric fields may arrive as
//! JSON numbers or numeric strings; a missing or `null` field is absent.

use serde_json::Value;

use common::json;

use crate::errors::ServiceError;

pub fn opt_i64(v: &Option<Value>, field: &str) -> Result<Option<i64>, ServiceError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => json::as_i64(raw)
            .map(Some)
            .ok_or_else(|| ServiceError::validation(format!("El campo {field} debe ser numérico"))),
    }
}

pub fn required_i64(v: &Option<Value>, field: &str) -> Result<i64, ServiceError> {
    opt_i64(v, field)?
        .ok_or_else(|| ServiceError::validation(format!("El campo {field} es obligatorio")))
}

pub fn opt_f64(v: &Option<Value>, field: &str) -> Result<Option<f64>, ServiceError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => json::as_f64(raw)
            .map(Some)
            .ok_or_else(|| ServiceError::validation(format!("El campo {field} debe ser numérico"))),
    }
}

pub fn required_f64(v: &Option<Value>, field: &str) -> Result<f64, ServiceError> {
    opt_f64(v, field)?
        .ok_or_else(|| ServiceError::validation(format!("El campo {field} es obligatorio")))
}

pub fn opt_bool(v: &Option<Value>) -> Option<bool> {
    v.as_ref().and_then(json::as_bool)
}

/// Text from a string or a bare number (`"edad": 3`), `None` when absent or blank.
pub fn opt_text_value(v: &Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Admin email from an untyped body. Only a string counts.
pub fn opt_email(v: &Option<Value>) -> Option<&str> {
    match v {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Trimmed text, `None` when absent or blank.
pub fn text(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_fields_report_the_field_name() {
        assert_eq!(required_i64(&Some(json!("4")), "usuarioId"), Ok(4));
        assert_eq!(
            required_i64(&None, "usuarioId"),
            Err(ServiceError::validation("El campo usuarioId es obligatorio"))
        );
        assert_eq!(
            required_i64(&Some(json!("cuatro")), "cantidad"),
            Err(ServiceError::validation("El campo cantidad debe ser numérico"))
        );
        assert_eq!(opt_f64(&Some(json!(null)), "total"), Ok(None));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(text(&Some("  hola ".into())), Some("hola"));
        assert_eq!(text(&Some("   ".into())), None);
        assert_eq!(text(&None), None);
        assert_eq!(opt_text_value(&Some(json!(3))), Some("3".into()));
        assert_eq!(opt_text_value(&Some(json!(""))), None);
        assert_eq!(opt_text_value(&Some(json!({"a": 1}))), None);
        assert_eq!(opt_email(&Some(json!("admin@amilimetros.cl"))), Some("admin@amilimetros.cl"));
        assert_eq!(opt_email(&Some(json!(7))), None);
    }
}

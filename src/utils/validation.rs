//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `validator`
//! y normalización de datos de entrada.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Placas: letras, dígitos y guiones, ya normalizadas a mayúsculas
    pub static ref LICENSE_PLATE_REGEX: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9 -]{1,18}[A-Z0-9]$")
        .expect("license plate regex is valid");
}

/// Normalizar una placa: sin espacios externos y en mayúsculas
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar el formato de una placa (se normaliza antes de comparar)
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let normalized = normalize_plate(value);
    if !LICENSE_PLATE_REGEX.is_match(&normalized) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate("  abc-123 "), "ABC-123");
        assert_eq!(normalize_plate("ABC-123"), "ABC-123");
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("abc-123").is_ok());
        assert!(validate_license_plate("XYZ 987 A").is_ok());
        assert!(validate_license_plate("-").is_err());
        assert!(validate_license_plate("ABC_123").is_err());
        assert!(validate_license_plate("").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Oaxaca").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}

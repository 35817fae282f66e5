// src/common/validation.rs

use validator::ValidationError;

// Texto só com espaços conta como vazio
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_blank() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \n\t ").is_err());
        assert!(validate_not_blank("  hi ").is_ok());
    }
}

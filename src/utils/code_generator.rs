//! Short code generation and validation utilities.
//!
//! Codes are 6–8 ASCII alphanumerics. Generated codes are always
//! [`GENERATED_CODE_LENGTH`] characters drawn uniformly from the 62-symbol
//! alphabet; custom codes may use the full 6–8 range.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of codes produced by [`RandomCodeGenerator`].
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Accepted code format, shared by link creation and redirect routing.
pub static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Codes that would shadow a top-level route.
const RESERVED_CODES: &[&str] = &["healthz"];

/// Source of candidate short codes.
///
/// Implementations are pure generators and never touch storage; uniqueness is
/// decided by the repository at insert time.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random generator over `[A-Za-z0-9]`.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self {
            length: GENERATED_CODE_LENGTH,
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `code` has the shape of a short code.
///
/// Used to disambiguate the catch-all redirect route: anything that fails this
/// check cannot exist in the store.
pub fn is_valid_code_format(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is not 6–8 alphanumerics or
/// is reserved for a system route.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code_format(code) {
        return Err(AppError::bad_request(
            "Code must be 6-8 characters long and contain only letters and numbers",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = RandomCodeGenerator::new().generate();
        assert_eq!(code.len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generated_codes_match_format() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..500 {
            let code = generator.generate();
            assert!(is_valid_code_format(&code), "bad generated code {code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 62^6 space; a collision among 1000 draws is vanishingly unlikely.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generator_uses_whole_alphabet() {
        let generator = RandomCodeGenerator::new();
        let chars: String = (0..2000).map(|_| generator.generate()).collect();

        assert!(chars.chars().any(|c| c.is_ascii_uppercase()));
        assert!(chars.chars().any(|c| c.is_ascii_lowercase()));
        assert!(chars.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_custom_code("abc123").is_ok());
        assert!(validate_custom_code("abcd1234").is_ok());
        assert!(validate_custom_code("abc12").is_err());
        assert!(validate_custom_code("abcd12345").is_err());
    }

    #[test]
    fn test_validate_mixed_case_and_digits() {
        assert!(validate_custom_code("MyLink24").is_ok());
        assert!(validate_custom_code("123456").is_ok());
        assert!(validate_custom_code("ABCDEF").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        for code in ["my-link", "my_link1", "abc 123", "abc12!", "ünïcode", "abc.12"] {
            let err = validate_custom_code(code).unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{code} accepted");
        }
    }

    #[test]
    fn test_validate_too_short_message() {
        let err = validate_custom_code("ab").unwrap_err();
        assert!(err.to_string().contains("6-8 characters"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_reserved_codes() {
        for &reserved in RESERVED_CODES {
            let err = validate_custom_code(reserved).unwrap_err();
            assert!(err.to_string().contains("reserved"));
        }
    }

    #[test]
    fn test_format_check_rejects_paths() {
        assert!(!is_valid_code_format("favicon.ico"));
        assert!(!is_valid_code_format("api"));
        assert!(is_valid_code_format("healthz"));
    }
}

//! DTOs for link endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The URL to redirect to (must be absolute, with a scheme).
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional custom code. Empty means "generate one"; the format is
    /// checked by the allocator.
    pub code: Option<String>,
}

impl CreateLinkRequest {
    /// Returns the custom code, treating an empty string as absent.
    pub fn custom_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Query string of `GET /api/links/{code}`.
#[derive(Debug, Default, Deserialize)]
pub struct LinkQuery {
    /// Only the literal `true` records a click.
    pub redirect: Option<String>,
}

impl LinkQuery {
    pub fn is_redirect(&self) -> bool {
        self.redirect.as_deref() == Some("true")
    }
}

/// Response of `DELETE /api/links/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, code: Option<&str>) -> CreateLinkRequest {
        CreateLinkRequest {
            url: url.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("https://example.com", None).validate().is_ok());
        assert!(request("https://example.com", Some("Abc123")).validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert!(request("not-a-url", None).validate().is_err());
        assert!(request("", None).validate().is_err());
    }

    #[test]
    fn test_empty_code_is_absent() {
        let req = request("https://x.com", Some(""));
        assert_eq!(req.custom_code(), None);
    }

    #[test]
    fn test_redirect_flag() {
        let query = |v: Option<&str>| LinkQuery {
            redirect: v.map(str::to_string),
        };

        assert!(query(Some("true")).is_redirect());
        assert!(!query(Some("1")).is_redirect());
        assert!(!query(Some("false")).is_redirect());
        assert!(!query(None).is_redirect());
    }
}

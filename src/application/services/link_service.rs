//! Link creation, lookup, click recording and deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    CodeGenerator, RandomCodeGenerator, is_valid_code_format, validate_custom_code,
};
use crate::utils::url_validator::validate_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// How many generated codes are tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Service for allocating short codes and resolving them.
///
/// Holds no state of its own besides the injected repository and code
/// generator, so one instance is shared by all request handlers.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a link service generating random 6-character codes.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, Arc::new(RandomCodeGenerator::new()))
    }

    /// Creates a link service with a specific code generator.
    pub fn with_generator(repository: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Creates a short link.
    ///
    /// # Code Allocation
    ///
    /// - If `custom_code` is provided, it must be 6-8 alphanumerics and not
    ///   already taken.
    /// - Otherwise a random 6-character code is generated. A collision reported
    ///   by the store's unique constraint triggers another attempt, up to
    ///   [`MAX_ALLOCATION_ATTEMPTS`].
    ///
    /// An empty `custom_code` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is malformed.
    /// Returns [`AppError::Conflict`] if the custom code already exists.
    /// Returns [`AppError::AllocationExhausted`] if every generated code collided.
    pub async fn create_link(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let link = match custom_code.filter(|c| !c.is_empty()) {
            Some(code) => self.create_with_custom_code(url, code).await?,
            None => self.create_with_generated_code(url).await?,
        };

        info!(code = %link.code, url = %link.url, "Link created");
        Ok(link)
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list().await
    }

    /// Looks up a link without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code_format(code) {
            return Err(link_not_found(code));
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Records a click and returns the link as committed after the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn record_click(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code_format(code) {
            return Err(link_not_found(code));
        }

        let link = self
            .repository
            .record_click(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        debug!(code = %link.code, total_clicks = link.total_clicks, "Click recorded");
        Ok(link)
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code_format(code) || !self.repository.delete(code).await? {
            return Err(link_not_found(code));
        }

        info!(code, "Link deleted");
        Ok(())
    }

    /// Checks that the underlying store answers.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn create_with_custom_code(&self, url: String, code: String) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        let new_link = NewLink {
            code: code.clone(),
            url,
        };

        match self.repository.create(new_link).await {
            Err(AppError::Conflict { .. }) => Err(AppError::conflict(
                "Code already exists",
                json!({ "code": code }),
            )),
            other => other,
        }
    }

    async fn create_with_generated_code(&self, url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let new_link = NewLink {
                code: self.generator.generate(),
                url: url.clone(),
            };

            match self.repository.create(new_link).await {
                Err(AppError::Conflict { details, .. }) => {
                    debug!(attempt, ?details, "Generated code collided, retrying");
                }
                other => return other,
            }
        }

        warn!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Failed to allocate a unique code"
        );
        Err(AppError::AllocationExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "code": code }))
}

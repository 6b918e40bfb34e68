//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever store the process was started with.
pub type DynLinkService = LinkService<dyn LinkRepository>;

/// Handles shared by all request handlers.
///
/// Cloning is cheap: every field is reference counted. The only mutable state
/// lives behind the repository.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
}

impl AppState {
    /// Builds the state around a repository.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
        }
    }
}

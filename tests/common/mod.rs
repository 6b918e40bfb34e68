#![allow(dead_code)]

use axum_test::TestServer;
use link_shortener::application::services::LinkService;
use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::MemoryLinkRepository;
use link_shortener::routes::router;
use link_shortener::state::AppState;
use link_shortener::utils::code_generator::CodeGenerator;
use std::sync::Arc;

/// Always proposes the same code.
pub struct FixedGenerator(pub &'static str);

impl CodeGenerator for FixedGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

pub fn create_test_state() -> (AppState, Arc<dyn LinkRepository>) {
    let repo: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
    (AppState::new(repo.clone()), repo)
}

pub fn create_test_state_with_generator(
    generator: Arc<dyn CodeGenerator>,
) -> (AppState, Arc<dyn LinkRepository>) {
    let repo: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
    let state = AppState {
        link_service: Arc::new(LinkService::with_generator(repo.clone(), generator)),
    };
    (state, repo)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(repo: &Arc<dyn LinkRepository>, code: &str, url: &str) {
    repo.create(NewLink {
        code: code.to_string(),
        url: url.to_string(),
    })
    .await
    .unwrap();
}

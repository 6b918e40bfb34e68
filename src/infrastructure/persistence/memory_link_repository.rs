//! Process-local link repository.
//!
//! Keeps every link in a map guarded by a single mutex, which plays the role
//! of the database's row locks: inserts check uniqueness and increments update
//! the counter inside the same critical section. Data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, CODE_UNIQUE_CONSTRAINT};

#[derive(Default)]
struct Store {
    next_id: i64,
    links: HashMap<String, Link>,
}

/// In-memory repository with the same semantics as the PostgreSQL one.
#[derive(Default)]
pub struct MemoryLinkRepository {
    store: Mutex<Store>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.store.lock().await;

        if store.links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Code already exists",
                json!({ "constraint": CODE_UNIQUE_CONSTRAINT }),
            ));
        }

        store.next_id += 1;
        let link = Link::new(store.next_id, new_link.code, new_link.url, Utc::now());
        store.links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.store.lock().await.links.get(code).cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let store = self.store.lock().await;
        let mut links: Vec<Link> = store.links.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut store = self.store.lock().await;

        Ok(store.links.get_mut(code).map(|link| {
            link.total_clicks += 1;
            link.last_clicked_at = Some(Utc::now());
            link.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.store.lock().await.links.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

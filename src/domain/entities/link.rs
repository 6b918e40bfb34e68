//! Link entity representing a shortened URL mapping and its click counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored short link.
///
/// `total_clicks` and `last_clicked_at` are only ever changed by the store's
/// atomic click increment; everything else is fixed at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            url,
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
        }
    }

    /// Returns true once the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

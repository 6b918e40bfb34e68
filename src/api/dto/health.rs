//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness response: `{"ok": true, "version": "0.1.0"}`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}

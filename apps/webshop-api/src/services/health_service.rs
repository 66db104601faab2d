//! Liveness and database reachability.

use tracing::warn;

use crate::api_types::HealthResponse;
use crate::state::AppState;

pub async fn check(state: &AppState) -> HealthResponse {
    let database = state.db.health_check().await;
    if !database {
        warn!("Health check: database unreachable");
    }

    HealthResponse {
        ok: database,
        service: state.build.service,
        version: state.build.version,
        database,
    }
}

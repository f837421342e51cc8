use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::tracker::StatsState;

#[derive(Serialize)]
pub struct LivenessResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    snapshot: &'static str,
}

/// Liveness check - is the process running?
/// Returns 200 if the server is alive.
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse { status: "ok" })
}

/// Readiness check - has the tracker produced a snapshot yet?
/// Ready once a refresh cycle completed, or when no identity is tracked
/// (nothing to fetch).
pub async fn readiness(state: web::Data<StatsState>) -> HttpResponse {
    let snapshot = state.snapshot();
    let ready = snapshot.last_updated.is_some() || snapshot.fid.is_none();

    let (status, snapshot_status, http_status) = if ready {
        ("ready", "ok", StatusCode::OK)
    } else {
        ("not_ready", "pending", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = ReadinessResponse {
        status,
        checks: ReadinessChecks {
            snapshot: snapshot_status,
        },
    };

    HttpResponse::build(http_status).json(response)
}

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::models::NutStats;
use crate::services::allowance::compute_reset_info;
use crate::tracker::StatsState;

/// Response for the display snapshot surface
#[derive(Serialize)]
pub struct StatsResponse {
    pub fid: Option<u64>,
    pub stats: NutStats,
    pub error: String,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub reset: ResetResponse,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub remaining: u32,
    pub reset_in: String,
}

/// GET /api/stats - Current snapshot plus the reset countdown.
/// The countdown is recomputed from the wall clock on every request.
pub async fn get_stats(state: web::Data<StatsState>, config: web::Data<Config>) -> HttpResponse {
    let snapshot = state.snapshot();
    let reset = compute_reset_info(Utc::now(), snapshot.stats.daily_used, &config.allowance);

    let response = StatsResponse {
        fid: snapshot.fid,
        stats: snapshot.stats,
        error: snapshot.error,
        loading: snapshot.loading,
        last_updated: snapshot.last_updated,
        reset: ResetResponse {
            remaining: reset.remaining,
            reset_in: reset.countdown(),
        },
    };

    HttpResponse::Ok().json(response)
}

/// Configure stats routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/stats").route("", web::get().to(get_stats)));
}

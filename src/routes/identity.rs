use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{AppError, AppResult};

/// Sender half of the identity channel the polling driver watches
pub type IdentitySender = watch::Sender<Option<u64>>;

#[derive(Serialize)]
pub struct IdentityResponse {
    pub fid: Option<u64>,
}

#[derive(Deserialize)]
pub struct SetIdentity {
    pub fid: u64,
}

/// GET /api/identity - Currently tracked identity
pub async fn get_identity(identity: web::Data<IdentitySender>) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse {
        fid: *identity.borrow(),
    })
}

/// PUT /api/identity - Install the tracked identity.
/// The polling loop picks the change up and restarts its interval.
pub async fn set_identity(
    identity: web::Data<IdentitySender>,
    body: web::Json<SetIdentity>,
) -> AppResult<HttpResponse> {
    let fid = body.into_inner().fid;

    if fid == 0 {
        return Err(AppError::Validation("fid must be non-zero".to_string()));
    }

    identity.send_if_modified(|current| {
        if *current != Some(fid) {
            *current = Some(fid);
            true
        } else {
            false
        }
    });

    Ok(HttpResponse::Ok().json(IdentityResponse { fid: Some(fid) }))
}

/// DELETE /api/identity - Stop tracking.
/// No identity means no fetches are attempted.
pub async fn clear_identity(identity: web::Data<IdentitySender>) -> AppResult<HttpResponse> {
    identity.send_if_modified(|current| {
        if current.is_some() {
            *current = None;
            true
        } else {
            false
        }
    });

    Ok(HttpResponse::NoContent().finish())
}

/// Configure identity routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/identity")
            .route("", web::get().to(get_identity))
            .route("", web::put().to(set_identity))
            .route("", web::delete().to(clear_identity)),
    );
}

//! src/routes/health_check.rs
use actix_web::HttpResponse;

/// Liveness check for the hosting platform. Touches no upstream service.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

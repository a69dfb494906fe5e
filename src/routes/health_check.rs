use actix_web::HttpResponse;
use serde_json::json;

#[tracing::instrument(
    "Checking if api is online"
)]
pub async fn health_check() -> HttpResponse{
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

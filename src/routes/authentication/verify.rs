use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    access::Actor,
    db_interaction::employees::get_account,
    error::ApiError,
    utils::DbPool
};

use super::UserPayload;

#[tracing::instrument(
    "Verifying access token",
    skip(pool, actor),
    fields(employee_id = %actor.employee_id)
)]
pub async fn verify(
    pool: web::Data<DbPool>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let account = get_account(&pool, actor.employee_id)
        .await
        .map_err(ApiError::entity("User"))?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "user": UserPayload::from(account)
    })))
}

use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;

use crate::{
    access::load_actor,
    auth::jwt::{TokenType, Tokenizer},
    error::ApiError,
    utils::DbPool
};

#[derive(Deserialize, Debug)]
pub struct RefreshForm{
    pub refresh_token: Option<String>
}

// The new pair carries the employee's current role, not the one in the old token
#[tracing::instrument(
    "Refreshing token pair",
    skip_all
)]
pub async fn refresh(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<RefreshForm>
) -> Result<HttpResponse, ApiError> {
    let token = form.into_inner().refresh_token
        .ok_or_else(|| ApiError::validation("Refresh token is required"))?;

    let claims = tokenizer.decode_as(&token, TokenType::Refresh)
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".into()))?;

    let actor = load_actor(&pool, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found or inactive".into()))?;

    let tokens = tokenizer
        .issue_pair(actor.employee_id, &actor.email, actor.role)
        .context("Failed to issue token pair")?;

    Ok(HttpResponse::Ok().json(tokens))
}

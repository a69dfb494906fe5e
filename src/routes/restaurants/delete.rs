use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::restaurants,
    error::ApiError,
    utils::DbPool
};

// Tenant data goes with it through ON DELETE CASCADE
#[tracing::instrument(
    "Deleting restaurant",
    skip(pool, actor)
)]
pub async fn delete_restaurant(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageTenants)?;

    restaurants::delete_restaurant(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::NoContent().finish())
}

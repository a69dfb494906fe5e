use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::vendors,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting vendor",
    skip(pool, actor)
)]
pub async fn delete_vendor(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageVendors)?;

    vendors::delete_vendor(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Vendor"))?;

    Ok(HttpResponse::NoContent().finish())
}

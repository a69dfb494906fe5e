use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::vendors,
    error::ApiError,
    models::VendorChanges,
    utils::DbPool
};

#[tracing::instrument(
    "Updating vendor",
    skip(pool, actor, changes)
)]
pub async fn update_vendor(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<VendorChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageVendors)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let vendor = vendors::update_vendor(&pool, path.into_inner(), changes)
        .await
        .map_err(ApiError::entity("Vendor"))?;

    Ok(HttpResponse::Ok().json(vendor))
}

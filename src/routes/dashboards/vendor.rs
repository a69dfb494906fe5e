use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::dashboards::vendor,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Building vendor dashboard",
    skip(pool, actor)
)]
pub async fn vendor_dashboard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ViewVendors)?;

    let dashboard = vendor::vendor_dashboard(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Vendor"))?;

    Ok(HttpResponse::Ok().json(dashboard))
}

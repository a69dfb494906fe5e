use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::{vendors::{self, VendorFilter}, PageQuery},
    error::ApiError,
    utils::DbPool
};

// Vendors are global, any signed-in employee may browse them
#[tracing::instrument(
    "Listing vendors",
    skip(pool, actor)
)]
pub async fn list_vendors(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<VendorFilter>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ViewVendors)?;

    let vendors = vendors::list_vendors(&pool, filter.into_inner(), page.page()).await?;
    Ok(HttpResponse::Ok().json(vendors))
}

#[tracing::instrument(
    "Getting vendor",
    skip(pool, actor)
)]
pub async fn get_vendor(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ViewVendors)?;

    let vendor = vendors::get_vendor(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Vendor"))?;

    Ok(HttpResponse::Ok().json(vendor))
}

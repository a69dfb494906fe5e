use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::restaurants,
    error::ApiError,
    models::RestaurantChanges,
    utils::DbPool
};

#[tracing::instrument(
    "Updating restaurant",
    skip(pool, actor, changes)
)]
pub async fn update_restaurant(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<RestaurantChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ManageTenants)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let restaurant = restaurants::update_restaurant(&pool, path.into_inner(), changes)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(restaurant))
}

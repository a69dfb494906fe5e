use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::dashboards::{analytics, realtime},
    error::ApiError,
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Building realtime status",
    skip(pool, actor)
)]
pub async fn realtime_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewRestaurant)?;

    let status = realtime::realtime_status(&pool, restaurant_id)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(status))
}

#[tracing::instrument(
    "Building restaurant vendor overview",
    skip(pool, actor)
)]
pub async fn restaurant_vendors(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewRestaurant)?;

    let overview = analytics::restaurant_vendors(&pool, restaurant_id)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(overview))
}

#[tracing::instrument(
    "Building inventory alerts",
    skip(pool, actor)
)]
pub async fn inventory_alerts(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewRestaurant)?;

    let alerts = analytics::inventory_alerts(&pool, restaurant_id, today())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(alerts))
}

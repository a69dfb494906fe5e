use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::dashboards::{analytics::{self, AnalyticsQuery}, manager, owner},
    error::ApiError,
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Building owner dashboard",
    skip(pool, actor)
)]
pub async fn owner_dashboard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewOwnerDashboard)?;

    let dashboard = owner::owner_dashboard(&pool, restaurant_id, today())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(dashboard))
}

#[tracing::instrument(
    "Building owner analytics",
    skip(pool, actor)
)]
pub async fn owner_analytics(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    query: web::Query<AnalyticsQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewOwnerDashboard)?;

    let report = analytics::restaurant_analytics(&pool, restaurant_id, today(), query.window_days())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(
    "Building manager dashboard",
    skip(pool, actor)
)]
pub async fn manager_dashboard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewManagerDashboard)?;

    let dashboard = manager::manager_dashboard(&pool, restaurant_id, today())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(dashboard))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::dashboards::staff,
    error::ApiError,
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Building staff dashboard",
    skip(pool, actor),
    fields(employee_id = %actor.employee_id)
)]
pub async fn staff_dashboard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewStaffDashboard)?;

    let dashboard = staff::staff_dashboard(&pool, restaurant_id, actor, today())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(dashboard))
}

#[tracing::instrument(
    "Building staff schedule",
    skip(pool, actor)
)]
pub async fn staff_schedule(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewStaffDashboard)?;

    let schedule = staff::staff_schedule(&pool, restaurant_id)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(schedule))
}

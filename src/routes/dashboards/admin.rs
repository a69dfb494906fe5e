use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::{dashboards::admin, stats},
    error::ApiError,
    health::{self, HealthHistory},
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Building admin dashboard",
    skip(pool, history, actor)
)]
pub async fn admin_dashboard(
    pool: web::Data<DbPool>,
    history: web::Data<HealthHistory>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ViewAdminDashboard)?;

    let dashboard = admin::admin_dashboard(&pool, today(), history.latest()).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

// Upserts today's DailyStats row, repeated calls overwrite it
#[tracing::instrument(
    "Recording daily stats snapshot",
    skip(pool, actor)
)]
pub async fn record_snapshot(
    pool: web::Data<DbPool>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::RecordSnapshot)?;

    let snapshot = stats::record_snapshot(&pool, today()).await?;
    tracing::info!(stat_date = %snapshot.stat_date, "Daily stats recorded");

    Ok(HttpResponse::Ok().json(snapshot))
}

#[tracing::instrument(
    "Checking system health",
    skip(pool, history, actor)
)]
pub async fn system_health(
    pool: web::Data<DbPool>,
    history: web::Data<HealthHistory>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    authorize(&actor, Scope::Global, Action::ViewAdminDashboard)?;

    let readings = health::probe(&pool).await;
    let change = history.record(health::score(&readings));

    Ok(HttpResponse::Ok().json(json!({
        "readings": readings,
        "health": change,
        "history": history.samples()
    })))
}

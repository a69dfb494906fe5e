use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::{dashboards::kitchen, orders},
    error::ApiError,
    models::OrderItemStatusForm,
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Building kitchen dashboard",
    skip(pool, actor)
)]
pub async fn kitchen_dashboard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewKitchenDashboard)?;

    let dashboard = kitchen::kitchen_dashboard(&pool, restaurant_id, today())
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(dashboard))
}

// POST /dashboard/kitchen/items/{order_item_id}/update-status/
#[tracing::instrument(
    "Updating kitchen item status",
    skip(pool, actor, form),
    fields(status = %form.status)
)]
pub async fn update_kitchen_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<OrderItemStatusForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_item_id = path.into_inner();
    let (_, order) = orders::get_order_item(&pool, order_item_id)
        .await
        .map_err(ApiError::entity("Order item"))?;
    authorize(&actor, Scope::Restaurant(order.restaurant_id), Action::UpdateKitchenItem)?;

    let (item, notification) = orders::update_order_item_status(&pool, order_item_id, form.status)
        .await
        .map_err(ApiError::entity("Order item"))?;
    if let Some(notification) = &notification {
        tracing::info!(
            notification_id = %notification.notification_id,
            title = %notification.title,
            "Kitchen item ready"
        );
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Item status updated to {}", item.status),
        "item": item,
        "notification": notification
    })))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{Action, Actor},
    db_interaction::orders,
    error::ApiError,
    models::{OrderChanges, OrderStatusForm},
    utils::DbPool
};

use super::authorized_order;

#[tracing::instrument(
    "Updating order",
    skip(pool, actor, changes)
)]
pub async fn update_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<OrderChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    authorized_order(&pool, &actor, order_id, Action::ManageRestaurantData).await?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let order = orders::update_order(&pool, order_id, changes)
        .await
        .map_err(ApiError::entity("Order"))?;

    Ok(HttpResponse::Ok().json(order))
}

// POST /api/orders/{id}/update-status/
#[tracing::instrument(
    "Updating order status",
    skip(pool, actor, form),
    fields(status = %form.status)
)]
pub async fn update_order_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<OrderStatusForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    authorized_order(&pool, &actor, order_id, Action::ManageRestaurantData).await?;

    let form = form.into_inner();
    let order = orders::update_order_status(
        &pool,
        order_id,
        form.status,
        form.payment_method.map(|method| method.to_string())
    )
    .await
    .map_err(ApiError::entity("Order"))?;

    Ok(HttpResponse::Ok().json(order))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::orders,
    error::ApiError,
    models::{check_lines, AddOrderItemsForm, NewOrderForm},
    utils::DbPool
};

use super::authorized_order;

#[tracing::instrument(
    "Creating order",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id, lines = form.items.len())
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    form: web::Json<NewOrderForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let (order, lines) = form.into_record().map_err(ApiError::Validation)?;
    let order = orders::create_order(&pool, order, lines).await?;
    tracing::info!(
        order_id = %order.order.order_id,
        total = order.order.total,
        "Order created"
    );

    Ok(HttpResponse::Created().json(order))
}

// POST /api/orders/{id}/items/
#[tracing::instrument(
    "Adding items to order",
    skip(pool, actor, form)
)]
pub async fn add_order_items(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<AddOrderItemsForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    authorized_order(&pool, &actor, order_id, Action::ManageRestaurantData).await?;

    let lines = form.into_inner().items;
    if lines.is_empty() {
        return Err(ApiError::validation("items must not be empty"));
    }
    check_lines(&lines).map_err(ApiError::Validation)?;

    let order = orders::add_order_items(&pool, order_id, lines).await?;
    Ok(HttpResponse::Ok().json(order))
}

// POST /api/orders/{id}/recalculate/
#[tracing::instrument(
    "Recalculating order",
    skip(pool, actor)
)]
pub async fn recalculate_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    authorized_order(&pool, &actor, order_id, Action::ManageRestaurantData).await?;

    let order = orders::recalculate_order(&pool, order_id)
        .await
        .map_err(ApiError::entity("Order"))?;

    Ok(HttpResponse::Ok().json(order))
}

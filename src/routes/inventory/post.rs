use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::inventory,
    error::ApiError,
    models::{NewInventoryCategoryForm, NewInventoryItemForm, StockUpdateForm},
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Creating inventory category",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_inventory_category(
    pool: web::Data<DbPool>,
    form: web::Json<NewInventoryCategoryForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let category = form.into_record().map_err(ApiError::Validation)?;
    let category = inventory::insert_inventory_category(&pool, category).await?;

    Ok(HttpResponse::Created().json(category))
}

#[tracing::instrument(
    "Creating inventory item",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_inventory_item(
    pool: web::Data<DbPool>,
    form: web::Json<NewInventoryItemForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let item = form.into_record(today()).map_err(ApiError::Validation)?;
    let item = inventory::insert_inventory_item(&pool, item).await?;

    Ok(HttpResponse::Created().json(item))
}

// POST /api/inventory/items/{id}/update-stock/
#[tracing::instrument(
    "Updating stock level",
    skip(pool, actor, form)
)]
pub async fn update_stock(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<StockUpdateForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let (action, quantity) = form.parse().map_err(ApiError::Validation)?;

    let current = inventory::get_inventory_item(&pool, item_id)
        .await
        .map_err(ApiError::entity("Inventory item"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let item = inventory::update_stock(&pool, item_id, action, quantity)
        .await
        .map_err(ApiError::entity("Inventory item"))?;
    tracing::info!(
        action = %action.as_str(),
        quantity,
        current_stock = item.current_stock,
        status = %item.status,
        "Stock updated"
    );

    Ok(HttpResponse::Ok().json(item))
}

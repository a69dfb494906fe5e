use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, visible_restaurants, Action, Actor, Scope},
    db_interaction::{inventory::{self, InventoryCategoryFilter, InventoryItemFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing inventory categories",
    skip(pool, actor)
)]
pub async fn list_inventory_categories(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<InventoryCategoryFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let categories = inventory::list_inventory_categories(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[tracing::instrument(
    "Listing inventory items",
    skip(pool, actor)
)]
pub async fn list_inventory_items(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<InventoryItemFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let items = inventory::list_inventory_items(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[tracing::instrument(
    "Getting inventory item",
    skip(pool, actor)
)]
pub async fn get_inventory_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let item = inventory::get_inventory_item(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Inventory item"))?;
    authorize(&actor, Scope::Restaurant(item.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(item))
}

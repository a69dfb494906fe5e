use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, visible_restaurants, Action, Actor, Scope},
    db_interaction::{menu::{self, MenuCategoryFilter, MenuItemFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing menu categories",
    skip(pool, actor)
)]
pub async fn list_menu_categories(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<MenuCategoryFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let results = menu::list_menu_categories(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[tracing::instrument(
    "Getting menu category",
    skip(pool, actor)
)]
pub async fn get_menu_category(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let record = menu::get_menu_category(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Menu category"))?;
    authorize(&actor, Scope::Restaurant(record.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Listing menu items",
    skip(pool, actor)
)]
pub async fn list_menu_items(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<MenuItemFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let results = menu::list_menu_items(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[tracing::instrument(
    "Getting menu item",
    skip(pool, actor)
)]
pub async fn get_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let record = menu::get_menu_item(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Menu item"))?;
    authorize(&actor, Scope::Restaurant(record.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(record))
}

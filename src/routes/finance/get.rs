use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, visible_restaurants, Action, Actor, Scope},
    db_interaction::{finance::{self, ExpenseFilter, WasteFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing expenses",
    skip(pool, actor)
)]
pub async fn list_expenses(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<ExpenseFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let results = finance::list_expenses(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[tracing::instrument(
    "Getting expense",
    skip(pool, actor)
)]
pub async fn get_expense(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let record = finance::get_expense(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Expense"))?;
    authorize(&actor, Scope::Restaurant(record.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Listing waste entries",
    skip(pool, actor)
)]
pub async fn list_waste(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<WasteFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let results = finance::list_waste(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[tracing::instrument(
    "Getting waste entry",
    skip(pool, actor)
)]
pub async fn get_waste(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let record = finance::get_waste(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Waste entry"))?;
    authorize(&actor, Scope::Restaurant(record.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(record))
}

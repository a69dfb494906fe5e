use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, visible_restaurants, Action, Actor, Scope},
    db_interaction::{seating::{self, TableFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing tables",
    skip(pool, actor)
)]
pub async fn list_tables(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<TableFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let tables = seating::list_tables(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(tables))
}

#[tracing::instrument(
    "Getting table",
    skip(pool, actor)
)]
pub async fn get_table(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table = seating::get_table(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(table.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(table))
}

#[tracing::instrument(
    "Listing chairs",
    skip(pool, actor)
)]
pub async fn list_chairs(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table_id = path.into_inner();
    let table = seating::get_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(table.restaurant_id), Action::ViewRestaurant)?;

    let chairs = seating::list_chairs(&pool, table_id).await?;
    Ok(HttpResponse::Ok().json(chairs))
}

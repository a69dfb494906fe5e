use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{visible_restaurants, Action, Actor},
    db_interaction::{orders::{self, OrderFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

use super::authorized_order;

#[tracing::instrument(
    "Listing orders",
    skip(pool, actor)
)]
pub async fn list_orders(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<OrderFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let orders = orders::list_orders(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order",
    skip(pool, actor)
)]
pub async fn get_order_details(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order = authorized_order(&pool, &actor, path.into_inner(), Action::ViewRestaurant).await?;

    Ok(HttpResponse::Ok().json(order))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, visible_restaurants, Action, Actor, Scope},
    db_interaction::{customers::{self, CustomerFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing customers",
    skip(pool, actor)
)]
pub async fn list_customers(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<CustomerFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let results = customers::list_customers(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[tracing::instrument(
    "Getting customer",
    skip(pool, actor)
)]
pub async fn get_customer(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let record = customers::get_customer(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Customer"))?;
    authorize(&actor, Scope::Restaurant(record.restaurant_id), Action::ViewRestaurant)?;

    Ok(HttpResponse::Ok().json(record))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::{restaurants::{self, RestaurantFilter}, PageQuery},
    error::ApiError,
    utils::DbPool
};

// Admins see every restaurant, everyone else only their own
#[tracing::instrument(
    "Listing restaurants",
    skip(pool, actor)
)]
pub async fn list_restaurants(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<RestaurantFilter>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = if actor.is_admin() { None } else { Some(actor.restaurants.clone()) };

    let restaurants = restaurants::list_restaurants(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

#[tracing::instrument(
    "Getting restaurant",
    skip(pool, actor)
)]
pub async fn get_restaurant(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let restaurant_id = path.into_inner();
    authorize(&actor, Scope::Restaurant(restaurant_id), Action::ViewRestaurant)?;

    let restaurant = restaurants::get_restaurant(&pool, restaurant_id)
        .await
        .map_err(ApiError::entity("Restaurant"))?;

    Ok(HttpResponse::Ok().json(restaurant))
}

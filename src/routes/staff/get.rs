use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{visible_restaurants, Action, Actor},
    db_interaction::{staff::{self, StaffFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

use super::authorize_for_employee;

#[tracing::instrument(
    "Listing staff",
    skip(pool, actor)
)]
pub async fn list_staff(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<StaffFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let members = staff::list_staff(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(members))
}

#[tracing::instrument(
    "Getting staff member",
    skip(pool, actor)
)]
pub async fn get_staff(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let member = staff::get_staff(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Staff member"))?;
    authorize_for_employee(&pool, &actor, member.staff.employee_id, Action::ViewRestaurant).await?;

    Ok(HttpResponse::Ok().json(member))
}

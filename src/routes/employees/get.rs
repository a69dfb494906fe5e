use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize_any, visible_restaurants, Action, Actor},
    db_interaction::{employees::{self, EmployeeFilter}, PageQuery},
    error::ApiError,
    routes::RestaurantQuery,
    utils::DbPool
};

#[tracing::instrument(
    "Listing employees",
    skip(pool, actor)
)]
pub async fn list_employees(
    pool: web::Data<DbPool>,
    page: web::Query<PageQuery>,
    filter: web::Query<EmployeeFilter>,
    restaurant: web::Query<RestaurantQuery>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let scope = visible_restaurants(&actor, restaurant.restaurant_id)?;

    let employees = employees::list_employees(&pool, filter.into_inner(), scope, page.page()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

// Anyone may read their own record
#[tracing::instrument(
    "Getting employee",
    skip(pool, actor)
)]
pub async fn get_employee(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let employee = employees::get_employee(&pool, path.into_inner())
        .await
        .map_err(ApiError::entity("Employee"))?;

    if employee.employee.employee_id != actor.employee_id {
        authorize_any(&actor, &employee.restaurants, Action::ViewRestaurant)?;
    }

    Ok(HttpResponse::Ok().json(employee))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize_any, Action, Actor},
    db_interaction::employees,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting employee",
    skip(pool, actor)
)]
pub async fn delete_employee(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    if employee_id == actor.employee_id {
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    let restaurants = employees::employee_restaurant_ids(&pool, employee_id).await?;
    if restaurants.is_empty() && !actor.is_admin() {
        return Err(ApiError::not_found("Employee"));
    }
    authorize_any(&actor, &restaurants, Action::ManageEmployees)?;

    employees::delete_employee(&pool, employee_id)
        .await
        .map_err(ApiError::entity("Employee"))?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{Action, Actor},
    db_interaction::staff,
    error::ApiError,
    utils::DbPool
};

use super::authorize_for_employee;

#[tracing::instrument(
    "Deleting staff profile",
    skip(pool, actor)
)]
pub async fn delete_staff(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let staff_id = path.into_inner();
    let member = staff::get_staff(&pool, staff_id)
        .await
        .map_err(ApiError::entity("Staff member"))?;
    authorize_for_employee(&pool, &actor, member.staff.employee_id, Action::ManageEmployees).await?;

    staff::delete_staff(&pool, staff_id)
        .await
        .map_err(ApiError::entity("Staff member"))?;

    Ok(HttpResponse::NoContent().finish())
}

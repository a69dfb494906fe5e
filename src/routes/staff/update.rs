use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{Action, Actor},
    db_interaction::staff,
    error::ApiError,
    models::StaffChanges,
    utils::DbPool
};

use super::authorize_for_employee;

#[tracing::instrument(
    "Updating staff profile",
    skip(pool, actor, changes)
)]
pub async fn update_staff(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<StaffChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let staff_id = path.into_inner();
    let member = staff::get_staff(&pool, staff_id)
        .await
        .map_err(ApiError::entity("Staff member"))?;
    authorize_for_employee(&pool, &actor, member.staff.employee_id, Action::ManageEmployees).await?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let profile = staff::update_staff(&pool, staff_id, changes)
        .await
        .map_err(ApiError::entity("Staff member"))?;

    Ok(HttpResponse::Ok().json(profile))
}

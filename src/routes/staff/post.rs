use actix_web::{web, HttpResponse};

use crate::{
    access::{Action, Actor},
    db_interaction::staff::insert_staff,
    error::ApiError,
    models::NewStaffForm,
    utils::DbPool
};

use super::authorize_for_employee;

#[tracing::instrument(
    "Creating staff profile",
    skip(pool, actor, form)
)]
pub async fn post_staff(
    pool: web::Data<DbPool>,
    form: web::Json<NewStaffForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize_for_employee(&pool, &actor, form.employee_id, Action::ManageEmployees).await?;

    let profile = form.into_record().map_err(ApiError::Validation)?;
    let profile = insert_staff(&pool, profile).await?;

    Ok(HttpResponse::Created().json(profile))
}

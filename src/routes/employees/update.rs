use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::{
    access::{authorize_any, Action, Actor},
    db_interaction::employees,
    domain::{employee_email::EmployeeEmail, phone_number::PhoneNumberDomain},
    error::ApiError,
    models::{EmployeeChangeset, EmployeeUpdateForm},
    password::hash_password,
    utils::DbPool
};

use super::check_grant;

#[tracing::instrument(
    "Updating employee",
    skip(pool, actor, form)
)]
pub async fn update_employee(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<EmployeeUpdateForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let current = employees::get_employee(&pool, employee_id)
        .await
        .map_err(ApiError::entity("Employee"))?;
    authorize_any(&actor, &current.restaurants, Action::ManageEmployees)?;

    let form = form.into_inner();
    check_grant(&actor, form.role, form.restaurants.as_deref())?;

    let mut changes = EmployeeChangeset{
        name: form.name,
        role: form.role.map(|role| role.to_string()),
        status: form.status.map(|status| status.to_string()),
        ..Default::default()
    };
    if let Some(email) = form.email {
        changes.email = Some(EmployeeEmail::parse(email).map_err(ApiError::Validation)?.inner());
    }
    if let Some(phone) = form.phone {
        changes.phone = Some(PhoneNumberDomain::parse(phone).map_err(ApiError::Validation)?.inner());
    }
    if let Some(password) = form.password {
        if password.expose_secret().len() < 8 {
            return Err(ApiError::validation("password must be at least 8 characters"));
        }
        changes.password = Some(hash_password(password).await?.expose_secret().to_string());
    }

    let employee = employees::update_employee(&pool, employee_id, changes, form.restaurants)
        .await
        .map_err(ApiError::entity("Employee"))?;

    Ok(HttpResponse::Ok().json(employee))
}

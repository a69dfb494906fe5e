use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::{
    access::Actor,
    db_interaction::employees::insert_employee,
    domain::{employee_email::EmployeeEmail, phone_number::PhoneNumberDomain},
    error::ApiError,
    models::{Employee, NewEmployeeForm},
    password::hash_password,
    utils::DbPool
};

use super::check_grant;

#[tracing::instrument(
    "Creating employee",
    skip(pool, actor, form),
    fields(role = %form.role)
)]
pub async fn post_employee(
    pool: web::Data<DbPool>,
    form: web::Json<NewEmployeeForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    check_grant(&actor, Some(form.role), Some(&form.restaurants))?;

    if form.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be blank"));
    }
    if form.password.expose_secret().len() < 8 {
        return Err(ApiError::validation("password must be at least 8 characters"));
    }
    let email = EmployeeEmail::parse(form.email).map_err(ApiError::Validation)?;
    let phone = PhoneNumberDomain::parse(form.phone).map_err(ApiError::Validation)?;
    let password_hash = hash_password(form.password).await?;

    let now = Utc::now();
    let employee = Employee{
        employee_id: Uuid::new_v4(),
        name: form.name.trim().to_string(),
        email: email.inner(),
        phone: phone.inner(),
        role: form.role.to_string(),
        password: password_hash.expose_secret().to_string(),
        status: form.status.to_string(),
        created_at: now,
        updated_at: now
    };

    let employee = insert_employee(&pool, employee, form.restaurants).await?;
    tracing::info!(employee_id = %employee.employee.employee_id, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

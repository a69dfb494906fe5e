use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{
    auth::jwt::{TokenPair, Tokenizer},
    db_interaction::employees::{find_account_by_email, touch_employee},
    domain::{role::{LoginPortal, Role}, status::EmployeeStatus},
    error::ApiError,
    password::verify_password,
    utils::DbPool
};

use super::UserPayload;

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: Option<String>,
    pub password: Option<SecretString>
}

#[derive(Serialize, Debug)]
pub struct LoginResponse{
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserPayload
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".into())
}

#[tracing::instrument(
    "Logging in employee",
    skip(pool, tokenizer, form),
    fields(email = tracing::field::Empty)
)]
async fn login(
    portal: LoginPortal,
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: LoginForm
) -> Result<HttpResponse, ApiError> {
    let (Some(email), Some(password)) = (form.email, form.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };
    let email = email.trim().to_lowercase();
    tracing::Span::current().record("email", tracing::field::display(&email));

    let account = find_account_by_email(&pool, email, portal.roles())
        .await?
        .ok_or_else(invalid_credentials)?;

    if account.employee.status != EmployeeStatus::Active.as_str() {
        tracing::info!("Inactive employee tried to log in");
        return Err(ApiError::Unauthorized("Account is inactive".into()));
    }

    if !verify_password(password, account.employee.password.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(invalid_credentials());
    }

    let role = account.employee.role.parse::<Role>()
        .map_err(|e| ApiError::Unexpected(anyhow::anyhow!(e)))?;
    let tokens = tokenizer
        .issue_pair(account.employee.employee_id, &account.employee.email, role)
        .context("Failed to issue token pair")?;

    touch_employee(&pool, account.employee.employee_id).await?;

    Ok(HttpResponse::Ok().json(LoginResponse{ tokens, user: UserPayload::from(account) }))
}

pub async fn admin_login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, ApiError> {
    login(LoginPortal::Admin, pool, tokenizer, form.into_inner()).await
}

pub async fn owner_login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, ApiError> {
    login(LoginPortal::Owner, pool, tokenizer, form.into_inner()).await
}

// Managers, kitchen, staff and waiters
pub async fn staff_login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, ApiError> {
    login(LoginPortal::Staff, pool, tokenizer, form.into_inner()).await
}

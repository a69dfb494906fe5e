use actix_web::{web, HttpResponse};

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::finance::{insert_expense, insert_waste},
    error::ApiError,
    models::{NewExpenseForm, NewWasteForm},
    routes::today,
    utils::DbPool
};

#[tracing::instrument(
    "Creating expense",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_expense(
    pool: web::Data<DbPool>,
    form: web::Json<NewExpenseForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let record = form.into_record(actor.employee_id).map_err(ApiError::Validation)?;
    let record = insert_expense(&pool, record).await?;

    Ok(HttpResponse::Created().json(record))
}

#[tracing::instrument(
    "Creating waste entry",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_waste(
    pool: web::Data<DbPool>,
    form: web::Json<NewWasteForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let record = form.into_record(actor.employee_id, today()).map_err(ApiError::Validation)?;
    let record = insert_waste(&pool, record).await?;

    Ok(HttpResponse::Created().json(record))
}

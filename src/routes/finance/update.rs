use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::finance,
    error::ApiError,
    models::{ExpenseChanges, WasteChanges},
    utils::DbPool
};

#[tracing::instrument(
    "Updating expense",
    skip(pool, actor, changes)
)]
pub async fn update_expense(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<ExpenseChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let expense_id = path.into_inner();
    let current = finance::get_expense(&pool, expense_id)
        .await
        .map_err(ApiError::entity("Expense"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;
    let record = finance::update_expense(&pool, expense_id, changes)
        .await
        .map_err(ApiError::entity("Expense"))?;

    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    "Updating waste entry",
    skip(pool, actor, changes)
)]
pub async fn update_waste(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<WasteChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let waste_id = path.into_inner();
    let current = finance::get_waste(&pool, waste_id)
        .await
        .map_err(ApiError::entity("Waste entry"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;
    let record = finance::update_waste(&pool, waste_id, changes)
        .await
        .map_err(ApiError::entity("Waste entry"))?;

    Ok(HttpResponse::Ok().json(record))
}

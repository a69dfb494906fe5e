use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::finance,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting expense",
    skip(pool, actor)
)]
pub async fn delete_expense(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let expense_id = path.into_inner();
    let current = finance::get_expense(&pool, expense_id)
        .await
        .map_err(ApiError::entity("Expense"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    finance::delete_expense(&pool, expense_id)
        .await
        .map_err(ApiError::entity("Expense"))?;

    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(
    "Deleting waste entry",
    skip(pool, actor)
)]
pub async fn delete_waste(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let waste_id = path.into_inner();
    let current = finance::get_waste(&pool, waste_id)
        .await
        .map_err(ApiError::entity("Waste entry"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    finance::delete_waste(&pool, waste_id)
        .await
        .map_err(ApiError::entity("Waste entry"))?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::seating,
    error::ApiError,
    models::{SeatingStatusForm, TableChanges},
    utils::DbPool
};

#[tracing::instrument(
    "Updating table",
    skip(pool, actor, changes)
)]
pub async fn update_table(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<TableChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table_id = path.into_inner();
    let current = seating::get_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let table = seating::update_table(&pool, table_id, changes)
        .await
        .map_err(ApiError::entity("Table"))?;

    Ok(HttpResponse::Ok().json(table))
}

#[tracing::instrument(
    "Updating table status",
    skip(pool, actor, form),
    fields(status = %form.status)
)]
pub async fn update_table_status(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<SeatingStatusForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table_id = path.into_inner();
    let current = seating::get_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let table = seating::set_table_status(&pool, table_id, form.status)
        .await
        .map_err(ApiError::entity("Table"))?;

    Ok(HttpResponse::Ok().json(table))
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::seating,
    error::ApiError,
    models::{NewChairForm, NewTableForm},
    utils::DbPool
};

#[tracing::instrument(
    "Creating table",
    skip(pool, actor, form),
    fields(restaurant_id = %form.restaurant_id)
)]
pub async fn post_table(
    pool: web::Data<DbPool>,
    form: web::Json<NewTableForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    authorize(&actor, Scope::Restaurant(form.restaurant_id), Action::ManageRestaurantData)?;

    let table = form.into_record().map_err(ApiError::Validation)?;
    let table = seating::insert_table(&pool, table).await?;

    Ok(HttpResponse::Created().json(table))
}

#[tracing::instrument(
    "Adding chair",
    skip(pool, actor, form)
)]
pub async fn post_chair(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<NewChairForm>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table_id = path.into_inner();
    let table = seating::get_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(table.restaurant_id), Action::ManageRestaurantData)?;

    let chair = form.into_inner().into_record(table_id).map_err(ApiError::Validation)?;
    let chair = seating::insert_chair(&pool, chair).await?;

    Ok(HttpResponse::Created().json(chair))
}

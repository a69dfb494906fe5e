use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::seating,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting table",
    skip(pool, actor)
)]
pub async fn delete_table(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let table_id = path.into_inner();
    let current = seating::get_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    seating::delete_table(&pool, table_id)
        .await
        .map_err(ApiError::entity("Table"))?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::customers,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting customer",
    skip(pool, actor)
)]
pub async fn delete_customer(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let customer_id = path.into_inner();
    let current = customers::get_customer(&pool, customer_id)
        .await
        .map_err(ApiError::entity("Customer"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    customers::delete_customer(&pool, customer_id)
        .await
        .map_err(ApiError::entity("Customer"))?;

    Ok(HttpResponse::NoContent().finish())
}

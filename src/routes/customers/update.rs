use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::customers,
    error::ApiError,
    models::CustomerChanges,
    utils::DbPool
};

#[tracing::instrument(
    "Updating customer",
    skip(pool, actor, changes)
)]
pub async fn update_customer(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<CustomerChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let customer_id = path.into_inner();
    let current = customers::get_customer(&pool, customer_id)
        .await
        .map_err(ApiError::entity("Customer"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;
    let record = customers::update_customer(&pool, customer_id, changes)
        .await
        .map_err(ApiError::entity("Customer"))?;

    Ok(HttpResponse::Ok().json(record))
}

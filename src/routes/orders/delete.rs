use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{Action, Actor},
    db_interaction::orders,
    error::ApiError,
    utils::DbPool
};

use super::authorized_order;

#[tracing::instrument(
    "Deleting order",
    skip(pool, actor)
)]
pub async fn delete_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    authorized_order(&pool, &actor, order_id, Action::ManageRestaurantData).await?;

    orders::delete_order(&pool, order_id)
        .await
        .map_err(ApiError::entity("Order"))?;

    Ok(HttpResponse::NoContent().finish())
}

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::inventory,
    error::ApiError,
    utils::DbPool
};

#[tracing::instrument(
    "Deleting inventory item",
    skip(pool, actor)
)]
pub async fn delete_inventory_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let current = inventory::get_inventory_item(&pool, item_id)
        .await
        .map_err(ApiError::entity("Inventory item"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    inventory::delete_inventory_item(&pool, item_id)
        .await
        .map_err(ApiError::entity("Inventory item"))?;

    Ok(HttpResponse::NoContent().finish())
}

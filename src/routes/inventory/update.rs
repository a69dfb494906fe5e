use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::inventory,
    error::ApiError,
    models::InventoryItemChanges,
    utils::DbPool
};

// The stock status is derived again from the updated row
#[tracing::instrument(
    "Updating inventory item",
    skip(pool, actor, changes)
)]
pub async fn update_inventory_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    changes: web::Json<InventoryItemChanges>,
    actor: Actor
) -> Result<HttpResponse, ApiError> {
    let item_id = path.into_inner();
    let current = inventory::get_inventory_item(&pool, item_id)
        .await
        .map_err(ApiError::entity("Inventory item"))?;
    authorize(&actor, Scope::Restaurant(current.restaurant_id), Action::ManageRestaurantData)?;

    let changes = changes.into_inner();
    changes.validate().map_err(ApiError::Validation)?;

    let item = inventory::update_inventory_item(&pool, item_id, changes)
        .await
        .map_err(ApiError::entity("Inventory item"))?;

    Ok(HttpResponse::Ok().json(item))
}

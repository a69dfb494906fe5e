use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    db_interaction::orders::get_order,
    error::ApiError,
    models::OrderWithItems,
    utils::DbPool
};

mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_order;
pub use get::{get_order_details, list_orders};
pub use post::{add_order_items, post_order, recalculate_order};
pub use update::{update_order, update_order_status};

// Loads the order and checks `action` against its restaurant
async fn authorized_order(
    pool: &DbPool,
    actor: &Actor,
    order_id: Uuid,
    action: Action
) -> Result<OrderWithItems, ApiError> {
    let order = get_order(pool, order_id)
        .await
        .map_err(ApiError::entity("Order"))?;
    authorize(actor, Scope::Restaurant(order.order.restaurant_id), action)?;

    Ok(order)
}

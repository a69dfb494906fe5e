mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_inventory_item;
pub use get::{get_inventory_item, list_inventory_categories, list_inventory_items};
pub use post::{post_inventory_category, post_inventory_item, update_stock};
pub use update::update_inventory_item;

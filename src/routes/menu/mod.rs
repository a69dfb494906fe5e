mod delete;
mod get;
mod post;
mod update;

pub use delete::{delete_menu_category, delete_menu_item};
pub use get::{get_menu_category, get_menu_item, list_menu_categories, list_menu_items};
pub use post::{post_menu_category, post_menu_item};
pub use update::{update_menu_category, update_menu_item};

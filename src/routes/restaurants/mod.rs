mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_restaurant;
pub use get::{get_restaurant, list_restaurants};
pub use post::post_restaurant;
pub use update::update_restaurant;

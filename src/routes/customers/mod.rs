mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_customer;
pub use get::{get_customer, list_customers};
pub use post::post_customer;
pub use update::update_customer;

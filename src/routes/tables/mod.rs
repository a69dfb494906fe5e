mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_table;
pub use get::{get_table, list_chairs, list_tables};
pub use post::{post_chair, post_table};
pub use update::{update_table, update_table_status};

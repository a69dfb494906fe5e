mod delete;
mod get;
mod post;
mod update;

pub use delete::{delete_expense, delete_waste};
pub use get::{get_expense, get_waste, list_expenses, list_waste};
pub use post::{post_expense, post_waste};
pub use update::{update_expense, update_waste};

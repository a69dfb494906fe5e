mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_vendor;
pub use get::{get_vendor, list_vendors};
pub use post::post_vendor;
pub use update::update_vendor;

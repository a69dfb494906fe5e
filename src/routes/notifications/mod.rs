mod get;
mod post;

pub use get::{list_notifications, my_notifications, MyNotificationsQuery};
pub use post::{mark_notification_read, post_notification};

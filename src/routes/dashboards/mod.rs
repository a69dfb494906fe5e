mod admin;
mod kitchen;
mod owner;
mod restaurant;
mod staff;
mod vendor;

pub use admin::{admin_dashboard, record_snapshot, system_health};
pub use kitchen::{kitchen_dashboard, update_kitchen_item};
pub use owner::{manager_dashboard, owner_analytics, owner_dashboard};
pub use restaurant::{inventory_alerts, realtime_status, restaurant_vendors};
pub use staff::{staff_dashboard, staff_schedule};
pub use vendor::vendor_dashboard;

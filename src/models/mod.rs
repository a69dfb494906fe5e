use std::str::FromStr;

mod customer;
mod finance;
mod inventory;
mod menu;
mod notification;
mod order;
mod seating;
mod stats;
mod tenancy;
mod vendor;

pub use customer::*;
pub use finance::*;
pub use inventory::*;
pub use menu::*;
pub use notification::*;
pub use order::*;
pub use seating::*;
pub use stats::*;
pub use tenancy::*;
pub use vendor::*;

// Text columns holding enum values are checked before they reach the database
pub(crate) fn check_enum<T>(value: &Option<String>) -> Result<(), String>
where
    T: FromStr<Err = String>
{
    match value {
        Some(v) => T::from_str(v).map(|_| ()),
        None => Ok(())
    }
}

pub(crate) fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if v < 0.0 || !v.is_finite() => Err(format!("{} must be a non-negative number", field)),
        _ => Ok(())
    }
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::{VendorStatus, VendorType};
use crate::schema::vendors;

use super::{check_enum, check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = vendors, check_for_backend(diesel::pg::Pg))]
pub struct Vendor{
    pub vendor_id: Uuid,
    pub name: String,
    pub vendor_type: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: String,
    pub rating: f64,
    pub total_orders: i32,
    pub revenue: f64,
    pub commission: f64,
    pub delivery_radius: Option<f64>,
    pub minimum_order: Option<f64>,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewVendorForm{
    pub name: String,
    pub vendor_type: VendorType,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_vendor_status")]
    pub status: VendorStatus,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub commission: f64,
    pub delivery_radius: Option<f64>,
    pub minimum_order: Option<f64>
}

fn default_vendor_status() -> VendorStatus {
    VendorStatus::PendingApproval
}

fn check_vendor_rating(rating: Option<f64>) -> Result<(), String> {
    match rating {
        Some(r) if !(0.0..=5.0).contains(&r) => Err("rating must be between 0 and 5".to_string()),
        _ => Ok(())
    }
}

impl NewVendorForm {
    pub fn into_record(self) -> Result<Vendor, String> {
        check_not_blank("name", &self.name)?;
        check_vendor_rating(Some(self.rating))?;
        check_non_negative("commission", Some(self.commission))?;

        Ok(Vendor{
            vendor_id: Uuid::new_v4(),
            name: self.name,
            vendor_type: self.vendor_type.to_string(),
            email: self.email,
            phone: self.phone,
            address: self.address,
            status: self.status.to_string(),
            rating: self.rating,
            total_orders: 0,
            revenue: 0.0,
            commission: self.commission,
            delivery_radius: self.delivery_radius,
            minimum_order: self.minimum_order,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = vendors)]
pub struct VendorChanges{
    pub name: Option<String>,
    pub vendor_type: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub total_orders: Option<i32>,
    pub revenue: Option<f64>,
    pub commission: Option<f64>,
    pub delivery_radius: Option<f64>,
    pub minimum_order: Option<f64>
}

impl VendorChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<VendorType>(&self.vendor_type)?;
        check_enum::<VendorStatus>(&self.status)?;
        check_vendor_rating(self.rating)?;
        check_non_negative("commission", self.commission)
    }
}

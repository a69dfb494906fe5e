use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::MembershipTier;
use crate::schema::customers;

use super::{check_enum, check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = customers, check_for_backend(diesel::pg::Pg))]
pub struct Customer{
    pub customer_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub loyalty_points: i32,
    pub total_orders: i32,
    pub total_spent: f64,
    pub membership_tier: String,
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewCustomerForm{
    pub restaurant_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub loyalty_points: i32,
    #[serde(default = "default_tier")]
    pub membership_tier: MembershipTier
}

fn default_tier() -> MembershipTier {
    MembershipTier::Bronze
}

impl NewCustomerForm {
    pub fn into_record(self) -> Result<Customer, String> {
        check_not_blank("name", &self.name)?;
        if self.loyalty_points < 0 {
            return Err("loyalty_points must be a non-negative number".to_string());
        }

        Ok(Customer{
            customer_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            loyalty_points: self.loyalty_points,
            total_orders: 0,
            total_spent: 0.0,
            membership_tier: self.membership_tier.to_string(),
            last_visit: None,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = customers)]
pub struct CustomerChanges{
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub loyalty_points: Option<i32>,
    pub total_orders: Option<i32>,
    pub total_spent: Option<f64>,
    pub membership_tier: Option<String>,
    pub last_visit: Option<DateTime<Utc>>
}

impl CustomerChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<MembershipTier>(&self.membership_tier)?;
        check_non_negative("total_spent", self.total_spent)
    }
}

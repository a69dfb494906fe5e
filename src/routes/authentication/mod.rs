use serde::Serialize;
use uuid::Uuid;

use crate::{
    db_interaction::employees::EmployeeAccount,
    domain::role::{LoginPortal, Role},
    models::StaffProfile
};

mod login;
mod logout;
mod refresh;
mod verify;

pub use login::{admin_login, owner_login, staff_login, LoginForm};
pub use logout::logout;
pub use refresh::{refresh, RefreshForm};
pub use verify::verify;

#[derive(Serialize, Debug)]
pub struct RestaurantRef{
    pub restaurant_id: Uuid,
    pub name: String
}

/// The `user` object of login and verify, shaped by role
#[derive(Serialize, Debug)]
pub struct UserPayload{
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub status: String,
    pub restaurants: Vec<RestaurantRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_profile: Option<StaffProfile>
}

impl From<EmployeeAccount> for UserPayload {
    fn from(account: EmployeeAccount) -> Self {
        let role = account.employee.role.parse::<Role>().ok();
        let is_staff = role.is_some_and(|role| LoginPortal::Staff.accepts(role));
        let restaurant_id = match role {
            Some(Role::Admin) | None => None,
            Some(_) => account.restaurants.first().map(|r| r.restaurant_id)
        };

        UserPayload{
            employee_id: account.employee.employee_id,
            name: account.employee.name,
            email: account.employee.email,
            phone: account.employee.phone,
            role: account.employee.role,
            status: account.employee.status,
            restaurants: account.restaurants
                .into_iter()
                .map(|r| RestaurantRef{ restaurant_id: r.restaurant_id, name: r.name })
                .collect(),
            restaurant_id,
            staff_profile: if is_staff { account.staff_profile } else { None }
        }
    }
}

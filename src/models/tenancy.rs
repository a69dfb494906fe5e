use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{role::Role, status::{EmployeeStatus, RestaurantStatus, Shift, StaffStatus}};
use crate::schema::{employee_restaurants, employees, restaurants, staff};

use super::{check_enum, check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = restaurants, check_for_backend(diesel::pg::Pg))]
pub struct Restaurant{
    pub restaurant_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: String,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewRestaurantForm{
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_restaurant_status")]
    pub status: RestaurantStatus
}

fn default_restaurant_status() -> RestaurantStatus {
    RestaurantStatus::Active
}

impl NewRestaurantForm {
    pub fn into_record(self) -> Result<Restaurant, String> {
        check_not_blank("name", &self.name)?;

        Ok(Restaurant{
            restaurant_id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email,
            phone: self.phone,
            address: self.address,
            status: self.status.to_string(),
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = restaurants)]
pub struct RestaurantChanges{
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>
}

impl RestaurantChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<RestaurantStatus>(&self.status)
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = employees, check_for_backend(diesel::pg::Pg))]
pub struct Employee{
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Debug)]
#[diesel(table_name = employee_restaurants)]
pub struct EmployeeRestaurant{
    pub employee_id: Uuid,
    pub restaurant_id: Uuid
}

// Employee as returned by the API, with the restaurants it belongs to
#[derive(Serialize, Debug)]
pub struct EmployeeWithRestaurants{
    #[serde(flatten)]
    pub employee: Employee,
    pub restaurants: Vec<Uuid>
}

#[derive(Deserialize, Debug)]
pub struct NewEmployeeForm{
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: SecretString,
    #[serde(default = "default_employee_status")]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub restaurants: Vec<Uuid>
}

fn default_employee_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

#[derive(Deserialize, Debug)]
pub struct EmployeeUpdateForm{
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub status: Option<EmployeeStatus>,
    pub password: Option<SecretString>,
    pub restaurants: Option<Vec<Uuid>>
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = employees)]
pub struct EmployeeChangeset{
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub updated_at: Option<DateTime<Utc>>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = staff, check_for_backend(diesel::pg::Pg))]
pub struct StaffProfile{
    pub staff_id: Uuid,
    pub employee_id: Uuid,
    pub salary: f64,
    pub status: String,
    pub shift: String,
    pub hire_date: NaiveDate,
    pub performance_rating: Option<f64>,
    pub address: String,
    pub emergency_contact: String,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewStaffForm{
    pub employee_id: Uuid,
    pub salary: f64,
    #[serde(default = "default_staff_status")]
    pub status: StaffStatus,
    pub shift: Shift,
    pub hire_date: NaiveDate,
    pub performance_rating: Option<f64>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String
}

fn default_staff_status() -> StaffStatus {
    StaffStatus::Active
}

impl NewStaffForm {
    pub fn into_record(self) -> Result<StaffProfile, String> {
        check_non_negative("salary", Some(self.salary))?;
        check_rating(self.performance_rating)?;

        Ok(StaffProfile{
            staff_id: Uuid::new_v4(),
            employee_id: self.employee_id,
            salary: self.salary,
            status: self.status.to_string(),
            shift: self.shift.to_string(),
            hire_date: self.hire_date,
            performance_rating: self.performance_rating,
            address: self.address,
            emergency_contact: self.emergency_contact,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = staff)]
pub struct StaffChanges{
    pub salary: Option<f64>,
    pub status: Option<String>,
    pub shift: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub performance_rating: Option<f64>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>
}

impl StaffChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<StaffStatus>(&self.status)?;
        check_enum::<Shift>(&self.shift)?;
        check_non_negative("salary", self.salary)?;
        check_rating(self.performance_rating)
    }
}

fn check_rating(rating: Option<f64>) -> Result<(), String> {
    match rating {
        Some(r) if !(0.0..=5.0).contains(&r) => Err("performance_rating must be between 0 and 5".to_string()),
        _ => Ok(())
    }
}

// Staff row joined with the employee it extends
#[derive(Serialize, Debug)]
pub struct StaffWithEmployee{
    #[serde(flatten)]
    pub staff: StaffProfile,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String
}

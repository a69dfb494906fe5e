use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{menu_categories, menu_items};

use super::{check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = menu_categories, check_for_backend(diesel::pg::Pg))]
pub struct MenuCategory{
    pub category_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewMenuCategoryForm{
    pub restaurant_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32
}

pub(crate) fn default_true() -> bool {
    true
}

impl NewMenuCategoryForm {
    pub fn into_record(self) -> Result<MenuCategory, String> {
        check_not_blank("name", &self.name)?;

        Ok(MenuCategory{
            category_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            sort_order: self.sort_order,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = menu_categories)]
pub struct MenuCategoryChanges{
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = menu_items, check_for_backend(diesel::pg::Pg))]
pub struct MenuItem{
    pub menu_item_id: Uuid,
    pub restaurant_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub preparation_time: i32,
    pub calories: Option<i32>,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewMenuItemForm{
    pub restaurant_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
    pub calories: Option<i32>,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool
}

fn default_preparation_time() -> i32 {
    15
}

impl NewMenuItemForm {
    pub fn into_record(self) -> Result<MenuItem, String> {
        check_not_blank("name", &self.name)?;
        check_non_negative("price", Some(self.price))?;
        if self.preparation_time < 0 {
            return Err("preparation_time must be a non-negative number".to_string());
        }

        Ok(MenuItem{
            menu_item_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            available: self.available,
            preparation_time: self.preparation_time,
            calories: self.calories,
            is_vegan: self.is_vegan,
            is_gluten_free: self.is_gluten_free,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges{
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub preparation_time: Option<i32>,
    pub calories: Option<i32>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>
}

impl MenuItemChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("price", self.price)
    }
}

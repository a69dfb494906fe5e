use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stock::{StockAction, StockStatus};
use crate::schema::{inventory_categories, inventory_items};

use super::{check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = inventory_categories, check_for_backend(diesel::pg::Pg))]
pub struct InventoryCategory{
    pub category_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewInventoryCategoryForm{
    pub restaurant_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String
}

impl NewInventoryCategoryForm {
    pub fn into_record(self) -> Result<InventoryCategory, String> {
        check_not_blank("name", &self.name)?;

        Ok(InventoryCategory{
            category_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            name: self.name,
            description: self.description,
            created_at: Utc::now()
        })
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = inventory_items, check_for_backend(diesel::pg::Pg))]
pub struct InventoryItem{
    pub item_id: Uuid,
    pub restaurant_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub current_stock: f64,
    pub min_stock: f64,
    pub max_stock: f64,
    pub unit: String,
    pub cost_per_unit: f64,
    pub supplier: String,
    pub barcode: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub last_restocked: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl InventoryItem {
    pub fn stock_status(&self, today: NaiveDate) -> StockStatus {
        StockStatus::derive(self.current_stock, self.min_stock, self.expiry_date, today)
    }
}

#[derive(Deserialize, Debug)]
pub struct NewInventoryItemForm{
    pub restaurant_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default)]
    pub max_stock: f64,
    pub unit: String,
    #[serde(default)]
    pub cost_per_unit: f64,
    #[serde(default)]
    pub supplier: String,
    pub barcode: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<NaiveDate>
}

impl NewInventoryItemForm {
    // Status is always derived, whatever the client sent
    pub fn into_record(self, today: NaiveDate) -> Result<InventoryItem, String> {
        check_not_blank("name", &self.name)?;
        check_not_blank("unit", &self.unit)?;
        check_non_negative("current_stock", Some(self.current_stock))?;
        check_non_negative("min_stock", Some(self.min_stock))?;
        check_non_negative("max_stock", Some(self.max_stock))?;
        check_non_negative("cost_per_unit", Some(self.cost_per_unit))?;

        let now = Utc::now();
        let status = StockStatus::derive(self.current_stock, self.min_stock, self.expiry_date, today);

        Ok(InventoryItem{
            item_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            category_id: self.category_id,
            name: self.name,
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            unit: self.unit,
            cost_per_unit: self.cost_per_unit,
            supplier: self.supplier,
            barcode: self.barcode,
            location: self.location,
            expiry_date: self.expiry_date,
            last_restocked: None,
            status: status.to_string(),
            created_at: now,
            updated_at: now
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = inventory_items)]
pub struct InventoryItemChanges{
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub current_stock: Option<f64>,
    pub min_stock: Option<f64>,
    pub max_stock: Option<f64>,
    pub unit: Option<String>,
    pub cost_per_unit: Option<f64>,
    pub supplier: Option<String>,
    pub barcode: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<NaiveDate>
}

impl InventoryItemChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("current_stock", self.current_stock)?;
        check_non_negative("min_stock", self.min_stock)?;
        check_non_negative("max_stock", self.max_stock)?;
        check_non_negative("cost_per_unit", self.cost_per_unit)
    }
}

#[derive(Deserialize, Debug)]
pub struct StockUpdateForm{
    pub action: String,
    pub quantity: f64
}

impl StockUpdateForm {
    pub fn parse(&self) -> Result<(StockAction, f64), String> {
        let action = self.action.parse::<StockAction>()
            .map_err(|_| "Invalid action. Use \"add\" or \"subtract\"".to_string())?;
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err("quantity must be a positive number".to_string());
        }

        Ok((action, self.quantity))
    }
}

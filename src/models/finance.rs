use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::{ExpenseCategory, WasteReason};
use crate::schema::{expenses, waste_entries};

use super::{check_enum, check_non_negative, check_not_blank};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = expenses, check_for_backend(diesel::pg::Pg))]
pub struct Expense{
    pub expense_id: Uuid,
    pub restaurant_id: Uuid,
    pub added_by: Option<Uuid>,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub expense_date: NaiveDate,
    pub payment_method: String,
    pub receipt: Option<String>,
    pub recurring: bool,
    pub approved: bool,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewExpenseForm{
    pub restaurant_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(alias = "date")]
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub payment_method: String,
    pub receipt: Option<String>,
    #[serde(default)]
    pub recurring: bool
}

impl NewExpenseForm {
    pub fn into_record(self, added_by: Uuid) -> Result<Expense, String> {
        check_not_blank("description", &self.description)?;
        check_non_negative("amount", Some(self.amount))?;

        Ok(Expense{
            expense_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            added_by: Some(added_by),
            description: self.description,
            amount: self.amount,
            category: self.category.to_string(),
            expense_date: self.expense_date,
            payment_method: self.payment_method,
            receipt: self.receipt,
            recurring: self.recurring,
            approved: false,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = expenses)]
pub struct ExpenseChanges{
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub expense_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub receipt: Option<String>,
    pub recurring: Option<bool>,
    pub approved: Option<bool>
}

impl ExpenseChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<ExpenseCategory>(&self.category)?;
        check_non_negative("amount", self.amount)
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = waste_entries, check_for_backend(diesel::pg::Pg))]
pub struct WasteEntry{
    pub waste_id: Uuid,
    pub restaurant_id: Uuid,
    pub reported_by: Option<Uuid>,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub reason: String,
    pub estimated_cost: f64,
    pub waste_date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>
}

#[derive(Deserialize, Debug)]
pub struct NewWasteForm{
    pub restaurant_id: Uuid,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub reason: WasteReason,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(alias = "date")]
    pub waste_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String
}

impl NewWasteForm {
    pub fn into_record(self, reported_by: Uuid, today: NaiveDate) -> Result<WasteEntry, String> {
        check_not_blank("item_name", &self.item_name)?;
        check_non_negative("quantity", Some(self.quantity))?;
        check_non_negative("estimated_cost", Some(self.estimated_cost))?;

        Ok(WasteEntry{
            waste_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            reported_by: Some(reported_by),
            item_name: self.item_name,
            quantity: self.quantity,
            unit: self.unit,
            reason: self.reason.to_string(),
            estimated_cost: self.estimated_cost,
            waste_date: self.waste_date.unwrap_or(today),
            notes: self.notes,
            created_at: Utc::now()
        })
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = waste_entries)]
pub struct WasteChanges{
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub reason: Option<String>,
    pub estimated_cost: Option<f64>,
    pub waste_date: Option<NaiveDate>,
    pub notes: Option<String>
}

impl WasteChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<WasteReason>(&self.reason)?;
        check_non_negative("quantity", self.quantity)?;
        check_non_negative("estimated_cost", self.estimated_cost)
    }
}

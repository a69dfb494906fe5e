use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order_totals::PricedLine;
use crate::domain::status::{OrderItemStatus, OrderStatus, OrderType, PaymentMethod};
use crate::schema::{order_items, orders};

use super::{check_enum, check_non_negative};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = orders, check_for_backend(diesel::pg::Pg))]
pub struct Order{
    pub order_id: Uuid,
    pub restaurant_id: Uuid,
    pub table_id: Option<Uuid>,
    pub chair_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub waiter_assigned: Option<Uuid>,
    pub status: String,
    pub order_type: String,
    pub subtotal: f64,
    pub tax: f64,
    pub service_charge: f64,
    pub discount: f64,
    pub total: f64,
    pub payment_method: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = order_items, check_for_backend(diesel::pg::Pg))]
pub struct OrderItem{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub status: String,
    pub notes: String,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl OrderItem {
    pub fn priced_line(&self) -> PricedLine {
        PricedLine { unit_price: self.unit_price, quantity: self.quantity }
    }
}

#[derive(Serialize, Debug)]
pub struct OrderItemDetail{
    #[serde(flatten)]
    pub item: OrderItem,
    pub menu_item_name: String
}

#[derive(Serialize, Debug)]
pub struct OrderWithItems{
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderLineForm{
    pub menu_item_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub notes: String
}

fn default_quantity() -> i32 {
    1
}

#[derive(Deserialize, Debug)]
pub struct NewOrderForm{
    pub restaurant_id: Uuid,
    pub table_id: Option<Uuid>,
    pub chair_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub waiter_assigned: Option<Uuid>,
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub service_charge: f64,
    #[serde(default)]
    pub discount: f64,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<OrderLineForm>
}

fn default_order_type() -> OrderType {
    OrderType::DineIn
}

pub(crate) fn check_lines(lines: &[OrderLineForm]) -> Result<(), String> {
    if lines.iter().any(|line| line.quantity <= 0) {
        return Err("quantity must be greater than zero".to_string());
    }
    Ok(())
}

impl NewOrderForm {
    // Totals start at zero and are filled in once the lines are priced
    pub fn into_record(self) -> Result<(Order, Vec<OrderLineForm>), String> {
        check_non_negative("tax", Some(self.tax))?;
        check_non_negative("service_charge", Some(self.service_charge))?;
        check_non_negative("discount", Some(self.discount))?;
        check_lines(&self.items)?;

        let now = Utc::now();
        let order = Order{
            order_id: Uuid::new_v4(),
            restaurant_id: self.restaurant_id,
            table_id: self.table_id,
            chair_id: self.chair_id,
            customer_id: self.customer_id,
            waiter_assigned: self.waiter_assigned,
            status: OrderStatus::Active.to_string(),
            order_type: self.order_type.to_string(),
            subtotal: 0.0,
            tax: self.tax,
            service_charge: self.service_charge,
            discount: self.discount,
            total: 0.0,
            payment_method: self.payment_method.map(|m| m.to_string()),
            notes: self.notes,
            created_at: now,
            updated_at: now
        };

        Ok((order, self.items))
    }
}

#[derive(Deserialize, AsChangeset, Debug)]
#[diesel(table_name = orders)]
pub struct OrderChanges{
    pub table_id: Option<Uuid>,
    pub chair_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub waiter_assigned: Option<Uuid>,
    pub order_type: Option<String>,
    pub tax: Option<f64>,
    pub service_charge: Option<f64>,
    pub discount: Option<f64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>
}

impl OrderChanges {
    pub fn validate(&self) -> Result<(), String> {
        check_enum::<OrderType>(&self.order_type)?;
        check_enum::<PaymentMethod>(&self.payment_method)?;
        check_non_negative("tax", self.tax)?;
        check_non_negative("service_charge", self.service_charge)?;
        check_non_negative("discount", self.discount)
    }

    // Charges feed into the total, so it has to be recomputed after the update
    pub fn touches_totals(&self) -> bool {
        self.tax.is_some() || self.service_charge.is_some() || self.discount.is_some()
    }
}

#[derive(Deserialize, Debug)]
pub struct OrderStatusForm{
    pub status: OrderStatus,
    pub payment_method: Option<PaymentMethod>
}

#[derive(Deserialize, Debug)]
pub struct OrderItemStatusForm{
    pub status: OrderItemStatus
}

#[derive(Deserialize, Debug)]
pub struct AddOrderItemsForm{
    pub items: Vec<OrderLineForm>
}

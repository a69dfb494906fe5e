use std::{collections::HashMap, error::Error, fmt::Debug};

use chrono::Utc;
use diesel::{pg::Pg, Connection, ExpressionMethods, OptionalExtension, PgConnection, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{order_totals::OrderTotals, status::{NotificationKind, OrderItemStatus, OrderStatus, OrderType, SeatingStatus}},
    models::{MenuItem, Notification, Order, OrderChanges, OrderItem, OrderItemDetail, OrderLineForm, OrderWithItems},
    schema::{customers, dining_tables, menu_items, notifications, order_items, orders},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, get_pooled_connection, run_query, run_transaction, DbError, DbPool, PoolGetError}
};

use super::{
    references::{collect_references, ensure_same_restaurant, ForeignReference, Reference},
    search_pattern, Page, Paginated
};

// Errors of the multi-step order mutations
#[derive(Error)]
pub enum OrderError{
    #[error("Menu item {0} does not belong to this restaurant")]
    UnknownMenuItem(Uuid),
    #[error("{0} is not available")]
    Unavailable(String),
    #[error("{0}")]
    ForeignReference(#[from] ForeignReference),
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] diesel::result::Error)
}

impl Debug for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct OrderFilter{
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub table_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub waiter_assigned: Option<Uuid>,
    pub search: Option<String>
}

fn filtered(
    filter: &OrderFilter,
    scope: &Option<Vec<Uuid>>
) -> orders::BoxedQuery<'static, Pg> {
    let mut query = orders::table.into_boxed();

    if let Some(ids) = scope {
        query = query.filter(orders::restaurant_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(orders::status.eq(status.as_str()));
    }
    if let Some(order_type) = filter.order_type {
        query = query.filter(orders::order_type.eq(order_type.as_str()));
    }
    if let Some(table_id) = filter.table_id {
        query = query.filter(orders::table_id.eq(table_id));
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(orders::customer_id.eq(customer_id));
    }
    if let Some(waiter) = filter.waiter_assigned {
        query = query.filter(orders::waiter_assigned.eq(waiter));
    }
    if let Some(term) = &filter.search {
        query = query.filter(orders::notes.ilike(search_pattern(term)));
    }

    query
}

#[tracing::instrument(
    "Listing orders",
    skip(pool)
)]
pub async fn list_orders(
    pool: &DbPool,
    filter: OrderFilter,
    scope: Option<Vec<Uuid>>,
    page: Page
) -> Result<Paginated<Order>, DbError> {
    run_query(pool, move |conn| {
        let count = filtered(&filter, &scope).count().get_result::<i64>(conn)?;
        let results = filtered(&filter, &scope)
            .order(orders::created_at.desc())
            .limit(page.limit)
            .offset(page.offset())
            .select(Order::as_select())
            .load(conn)?;

        Ok(Paginated::new(count, page, results))
    })
    .await
}

fn load_order_with_items(conn: &mut PgConnection, order_id: Uuid) -> Result<OrderWithItems, diesel::result::Error> {
    let order = orders::table
        .find(order_id)
        .select(Order::as_select())
        .first(conn)?;

    let items = order_items::table
        .inner_join(menu_items::table)
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::added_at.asc())
        .select((OrderItem::as_select(), menu_items::name))
        .load::<(OrderItem, String)>(conn)?
        .into_iter()
        .map(|(item, menu_item_name)| OrderItemDetail{ item, menu_item_name })
        .collect();

    Ok(OrderWithItems{ order, items })
}

#[tracing::instrument(
    "Getting order with its items",
    skip(pool)
)]
pub async fn get_order(pool: &DbPool, order_id: Uuid) -> Result<OrderWithItems, DbError> {
    run_query(pool, move |conn| load_order_with_items(conn, order_id)).await
}

// subtotal and total follow from the current lines and charges
pub fn recompute_totals(conn: &mut PgConnection, order_id: Uuid) -> Result<Order, diesel::result::Error> {
    let order = orders::table
        .find(order_id)
        .select(Order::as_select())
        .for_update()
        .first(conn)?;

    let lines: Vec<_> = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .select(OrderItem::as_select())
        .load(conn)?
        .iter()
        .map(OrderItem::priced_line)
        .collect();

    let totals = OrderTotals::compute(&lines, order.tax, order.service_charge, order.discount);

    diesel::update(orders::table.find(order_id))
        .set((
            orders::subtotal.eq(totals.subtotal),
            orders::total.eq(totals.total),
            orders::updated_at.eq(Utc::now())
        ))
        .returning(Order::as_returning())
        .get_result(conn)
}

// Seating, customer and waiter of an order come from its own restaurant
fn order_references(
    table_id: Option<Uuid>,
    chair_id: Option<Uuid>,
    customer_id: Option<Uuid>,
    waiter_assigned: Option<Uuid>
) -> Vec<Reference> {
    collect_references(&[
        table_id.map(Reference::Table),
        chair_id.map(Reference::Chair),
        customer_id.map(Reference::Customer),
        waiter_assigned.map(Reference::Employee)
    ])
}

// Lines are priced from the menu of the order's restaurant at the time they are added
fn insert_lines(
    conn: &mut PgConnection,
    order: &Order,
    lines: &[OrderLineForm]
) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = lines.iter().map(|line| line.menu_item_id).collect();
    let menu: HashMap<Uuid, MenuItem> = menu_items::table
        .filter(menu_items::menu_item_id.eq_any(ids))
        .filter(menu_items::restaurant_id.eq(order.restaurant_id))
        .select(MenuItem::as_select())
        .load::<MenuItem>(conn)?
        .into_iter()
        .map(|item| (item.menu_item_id, item))
        .collect();

    let now = Utc::now();
    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let item = menu.get(&line.menu_item_id)
            .ok_or(OrderError::UnknownMenuItem(line.menu_item_id))?;
        if !item.available {
            return Err(OrderError::Unavailable(item.name.clone()));
        }

        rows.push(OrderItem{
            order_item_id: Uuid::new_v4(),
            order_id: order.order_id,
            menu_item_id: item.menu_item_id,
            quantity: line.quantity,
            unit_price: item.price,
            status: OrderItemStatus::Pending.to_string(),
            notes: line.notes.clone(),
            added_at: now,
            updated_at: now
        });
    }

    diesel::insert_into(order_items::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

#[tracing::instrument(
    "Creating order with items",
    skip(pool, order, lines),
    fields(order_id = %order.order_id)
)]
pub async fn create_order(
    pool: &DbPool,
    order: Order,
    lines: Vec<OrderLineForm>
) -> Result<OrderWithItems, OrderError> {
    let mut conn = get_pooled_connection(pool).await?;

    spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            ensure_same_restaurant::<OrderError>(
                conn,
                order.restaurant_id,
                &order_references(order.table_id, order.chair_id, order.customer_id, order.waiter_assigned)
            )?;

            let order = diesel::insert_into(orders::table)
                .values(&order)
                .returning(Order::as_returning())
                .get_result(conn)?;

            insert_lines(conn, &order, &lines)?;
            recompute_totals(conn, order.order_id)?;

            Ok(load_order_with_items(conn, order.order_id)?)
        })
    })
    .await?
}

#[tracing::instrument(
    "Adding items to order",
    skip(pool, lines)
)]
pub async fn add_order_items(
    pool: &DbPool,
    order_id: Uuid,
    lines: Vec<OrderLineForm>
) -> Result<OrderWithItems, OrderError> {
    let mut conn = get_pooled_connection(pool).await?;

    spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderWithItems, OrderError, _>(|conn| {
            let order = orders::table
                .find(order_id)
                .select(Order::as_select())
                .first(conn)?;

            insert_lines(conn, &order, &lines)?;
            recompute_totals(conn, order_id)?;

            Ok(load_order_with_items(conn, order_id)?)
        })
    })
    .await?
}

#[tracing::instrument(
    "Recalculating order totals",
    skip(pool)
)]
pub async fn recalculate_order(pool: &DbPool, order_id: Uuid) -> Result<Order, DbError> {
    run_query(pool, move |conn| {
        conn.transaction(|conn| recompute_totals(conn, order_id))
    })
    .await
}

#[tracing::instrument(
    "Updating order",
    skip(pool)
)]
pub async fn update_order(pool: &DbPool, order_id: Uuid, changes: OrderChanges) -> Result<Order, DbError> {
    run_transaction(pool, move |conn| {
        let restaurant_id = orders::table
            .find(order_id)
            .select(orders::restaurant_id)
            .for_update()
            .first::<Uuid>(conn)?;
        ensure_same_restaurant::<DbError>(
            conn,
            restaurant_id,
            &order_references(changes.table_id, changes.chair_id, changes.customer_id, changes.waiter_assigned)
        )?;

        let order = diesel::update(orders::table.find(order_id))
            .set((&changes, orders::updated_at.eq(Utc::now())))
            .returning(Order::as_returning())
            .get_result(conn)?;

        if changes.touches_totals() {
            Ok(recompute_totals(conn, order_id)?)
        } else {
            Ok(order)
        }
    })
    .await
}

// Completing an order frees its table for cleaning and credits the customer
#[tracing::instrument(
    "Updating order status",
    skip(pool)
)]
pub async fn update_order_status(
    pool: &DbPool,
    order_id: Uuid,
    status: OrderStatus,
    payment_method: Option<String>
) -> Result<Order, DbError> {
    run_query(pool, move |conn| {
        conn.transaction(|conn| {
            let previous = orders::table
                .find(order_id)
                .select(Order::as_select())
                .for_update()
                .first(conn)?;

            let order = diesel::update(orders::table.find(order_id))
                .set((
                    orders::status.eq(status.as_str()),
                    orders::payment_method.eq(payment_method.or(previous.payment_method.clone())),
                    orders::updated_at.eq(Utc::now())
                ))
                .returning(Order::as_returning())
                .get_result(conn)?;

            let completing = status == OrderStatus::Completed
                && previous.status != OrderStatus::Completed.as_str();

            if completing {
                if let Some(table_id) = order.table_id {
                    diesel::update(dining_tables::table.find(table_id))
                        .set(dining_tables::status.eq(SeatingStatus::Cleaning.as_str()))
                        .execute(conn)?;
                }

                if let Some(customer_id) = order.customer_id {
                    diesel::update(customers::table.find(customer_id))
                        .set((
                            customers::total_orders.eq(customers::total_orders + 1),
                            customers::total_spent.eq(customers::total_spent + order.total),
                            customers::last_visit.eq(Some(Utc::now()))
                        ))
                        .execute(conn)?;
                }
            }

            Ok(order)
        })
    })
    .await
}

#[tracing::instrument(
    "Deleting order",
    skip(pool)
)]
pub async fn delete_order(pool: &DbPool, order_id: Uuid) -> Result<(), DbError> {
    run_query(pool, move |conn| {
        let deleted = diesel::delete(orders::table.find(order_id)).execute(conn)?;
        if deleted == 0 {
            return Err(diesel::result::Error::NotFound);
        }
        Ok(())
    })
    .await
}

#[tracing::instrument(
    "Getting order item with its order",
    skip(pool)
)]
pub async fn get_order_item(pool: &DbPool, order_item_id: Uuid) -> Result<(OrderItem, Order), DbError> {
    run_query(pool, move |conn| {
        order_items::table
            .inner_join(orders::table)
            .filter(order_items::order_item_id.eq(order_item_id))
            .select((OrderItem::as_select(), Order::as_select()))
            .first(conn)
    })
    .await
}

pub fn ready_title(table_number: Option<&str>) -> String {
    match table_number {
        Some(number) => format!("Order Ready - Table {}", number),
        None => "Order Ready - Takeaway".to_string()
    }
}

// A move to `ready` notifies the restaurant in the same transaction
#[tracing::instrument(
    "Updating order item status",
    skip(pool)
)]
pub async fn update_order_item_status(
    pool: &DbPool,
    order_item_id: Uuid,
    status: OrderItemStatus
) -> Result<(OrderItem, Option<Notification>), DbError> {
    run_query(pool, move |conn| {
        conn.transaction(|conn| {
            let (previous, order) = order_items::table
                .inner_join(orders::table)
                .filter(order_items::order_item_id.eq(order_item_id))
                .select((OrderItem::as_select(), Order::as_select()))
                .for_update()
                .first::<(OrderItem, Order)>(conn)?;

            let item = diesel::update(order_items::table.find(order_item_id))
                .set((
                    order_items::status.eq(status.as_str()),
                    order_items::updated_at.eq(Utc::now())
                ))
                .returning(OrderItem::as_returning())
                .get_result(conn)?;

            let became_ready = status == OrderItemStatus::Ready
                && previous.status != OrderItemStatus::Ready.as_str();
            if !became_ready {
                return Ok((item, None));
            }

            let table_number = match order.table_id {
                Some(table_id) => dining_tables::table
                    .find(table_id)
                    .select(dining_tables::number)
                    .first::<String>(conn)
                    .optional()?,
                None => None
            };
            let menu_item_name = menu_items::table
                .find(item.menu_item_id)
                .select(menu_items::name)
                .first::<String>(conn)?;

            let notification = Notification::new(
                Some(order.restaurant_id),
                None,
                ready_title(table_number.as_deref()),
                format!("{}x {} is ready to serve", item.quantity, menu_item_name),
                NotificationKind::Success
            );
            let notification = diesel::insert_into(notifications::table)
                .values(&notification)
                .returning(Notification::as_returning())
                .get_result(conn)?;

            Ok((item, Some(notification)))
        })
    })
    .await
}

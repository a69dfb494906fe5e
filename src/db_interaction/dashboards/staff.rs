use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::{BoolExpressionMethods, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    access::Actor,
    db_interaction::day_range,
    domain::{role::Role, status::{OrderStatus, Shift, StaffStatus}},
    models::{DiningTable, Notification, StaffProfile, StaffWithEmployee},
    schema::{dining_tables, employee_restaurants, employees, notifications, orders, staff},
    utils::{round_to, run_consistent_read, DbError, DbPool}
};

use super::{load_restaurant, table_breakdown, RestaurantSummary, TableBreakdown};

// Staff profiles of the employees linked to a restaurant
pub(crate) fn restaurant_staff(
    conn: &mut PgConnection,
    restaurant_id: Uuid
) -> Result<Vec<StaffWithEmployee>, diesel::result::Error> {
    let rows = staff::table
        .inner_join(employees::table)
        .filter(staff::employee_id.eq_any(
            employee_restaurants::table
                .filter(employee_restaurants::restaurant_id.eq(restaurant_id))
                .select(employee_restaurants::employee_id)
        ))
        .order(employees::name.asc())
        .select((StaffProfile::as_select(), employees::name, employees::email, employees::phone, employees::role))
        .load::<(StaffProfile, String, String, String, String)>(conn)?;

    Ok(rows.into_iter()
        .map(|(staff, name, email, phone, role)| StaffWithEmployee{ staff, name, email, phone, role })
        .collect())
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct StaffCounts{
    pub total: i64,
    pub active: i64,
    pub on_leave: i64,
    pub inactive: i64
}

impl StaffCounts {
    pub fn from_members(members: &[StaffWithEmployee]) -> Self {
        let mut counts = StaffCounts::default();
        for member in members {
            counts.total += 1;
            match member.staff.status.parse::<StaffStatus>() {
                Ok(StaffStatus::Active) => counts.active += 1,
                Ok(StaffStatus::OnLeave) => counts.on_leave += 1,
                Ok(StaffStatus::Inactive) => counts.inactive += 1,
                Err(_) => {}
            }
        }
        counts
    }
}

// Active staff whose shift covers `hour` (UTC)
pub fn on_duty(members: &[StaffWithEmployee], hour: u32) -> i64 {
    members.iter()
        .filter(|m| m.staff.status == StaffStatus::Active.as_str())
        .filter(|m| m.staff.shift.parse::<Shift>().is_ok_and(|shift| shift.covers_hour(hour)))
        .count() as i64
}

#[derive(Serialize, Debug)]
pub struct ShiftGroup{
    pub shift: Shift,
    pub count: usize,
    pub staff: Vec<StaffWithEmployee>
}

// Every shift appears, in a fixed order, even when nobody works it
pub fn group_by_shift(members: Vec<StaffWithEmployee>) -> Vec<ShiftGroup> {
    let mut groups: Vec<ShiftGroup> = Shift::ALL.iter()
        .map(|shift| ShiftGroup{ shift: *shift, count: 0, staff: Vec::new() })
        .collect();

    for member in members {
        if let Some(group) = groups.iter_mut().find(|g| g.shift.as_str() == member.staff.shift) {
            group.count += 1;
            group.staff.push(member);
        }
    }
    groups
}

pub fn count_by_role(members: &[StaffWithEmployee]) -> BTreeMap<String, i64> {
    let mut by_role = BTreeMap::new();
    for member in members {
        *by_role.entry(member.role.clone()).or_insert(0) += 1;
    }
    by_role
}

#[derive(Serialize, Debug)]
pub struct StaffSchedule{
    pub restaurant: RestaurantSummary,
    pub counts: StaffCounts,
    pub by_role: BTreeMap<String, i64>,
    pub shifts: Vec<ShiftGroup>,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building staff schedule",
    skip(pool)
)]
pub async fn staff_schedule(pool: &DbPool, restaurant_id: Uuid) -> Result<StaffSchedule, DbError> {
    run_consistent_read(pool, move |conn| {
        let restaurant = load_restaurant(conn, restaurant_id)?;
        let members = restaurant_staff(conn, restaurant_id)?;

        Ok(StaffSchedule{
            restaurant: RestaurantSummary::from(&restaurant),
            counts: StaffCounts::from_members(&members),
            by_role: count_by_role(&members),
            shifts: group_by_shift(members),
            last_updated: Utc::now()
        })
    })
    .await
}

#[derive(Serialize, Debug)]
pub struct StaffMemberProfile{
    pub employee_id: Uuid,
    pub name: String,
    pub role: Role,
    pub staff: Option<StaffProfile>
}

#[derive(Serialize, Debug)]
pub struct StaffToday{
    pub orders_handled: i64,
    pub completed_orders: i64,
    pub revenue: f64
}

#[derive(Serialize, Debug)]
pub struct StaffDashboard{
    pub restaurant: RestaurantSummary,
    pub profile: StaffMemberProfile,
    pub shift: Option<String>,
    pub assigned_tables: Vec<DiningTable>,
    pub today: StaffToday,
    pub tables: TableBreakdown,
    pub notifications: Vec<Notification>,
    pub last_updated: DateTime<Utc>
}

#[tracing::instrument(
    "Building staff dashboard",
    skip(pool, actor),
    fields(employee_id = %actor.employee_id)
)]
pub async fn staff_dashboard(
    pool: &DbPool,
    restaurant_id: Uuid,
    actor: Actor,
    today: NaiveDate
) -> Result<StaffDashboard, DbError> {
    run_consistent_read(pool, move |conn| {
        let restaurant = load_restaurant(conn, restaurant_id)?;
        let me = actor.employee_id;
        let (start, end) = day_range(today);

        let profile = staff::table
            .filter(staff::employee_id.eq(me))
            .select(StaffProfile::as_select())
            .first(conn)
            .optional()?;

        let assigned_tables = dining_tables::table
            .filter(dining_tables::restaurant_id.eq(restaurant_id))
            .filter(dining_tables::waiter_assigned.eq(me))
            .order(dining_tables::number.asc())
            .select(DiningTable::as_select())
            .load(conn)?;

        let handled: Vec<(String, f64)> = orders::table
            .filter(orders::restaurant_id.eq(restaurant_id))
            .filter(orders::waiter_assigned.eq(me))
            .filter(orders::created_at.ge(start))
            .filter(orders::created_at.lt(end))
            .select((orders::status, orders::total))
            .load(conn)?;
        let completed: Vec<f64> = handled.iter()
            .filter(|(status, _)| status == OrderStatus::Completed.as_str())
            .map(|(_, total)| *total)
            .collect();

        let notifications = notifications::table
            .filter(notifications::read.eq(false))
            .filter(
                notifications::restaurant_id.eq(restaurant_id)
                    .or(notifications::employee_id.eq(me))
            )
            .order(notifications::created_at.desc())
            .limit(10)
            .select(Notification::as_select())
            .load(conn)?;

        Ok(StaffDashboard{
            restaurant: RestaurantSummary::from(&restaurant),
            shift: profile.as_ref().map(|p| p.shift.clone()),
            profile: StaffMemberProfile{
                employee_id: me,
                name: actor.name,
                role: actor.role,
                staff: profile
            },
            assigned_tables,
            today: StaffToday{
                orders_handled: handled.len() as i64,
                completed_orders: completed.len() as i64,
                revenue: round_to(completed.iter().sum(), 2)
            },
            tables: table_breakdown(conn, restaurant_id)?,
            notifications,
            last_updated: Utc::now()
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn member(role: &str, status: StaffStatus, shift: Shift) -> StaffWithEmployee {
        let employee_id = Uuid::new_v4();
        StaffWithEmployee{
            staff: StaffProfile{
                staff_id: Uuid::new_v4(),
                employee_id,
                salary: 1000.0,
                status: status.to_string(),
                shift: shift.to_string(),
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                performance_rating: None,
                address: String::new(),
                emergency_contact: String::new(),
                created_at: Utc::now()
            },
            name: format!("{} {}", role, employee_id),
            email: format!("{}@example.com", employee_id),
            phone: "9876543210".to_string(),
            role: role.to_string()
        }
    }

    #[test]
    fn every_shift_is_listed_in_order() {
        let groups = group_by_shift(vec![
            member("waiter", StaffStatus::Active, Shift::Night),
            member("kitchen", StaffStatus::Active, Shift::Morning),
            member("waiter", StaffStatus::OnLeave, Shift::Morning),
        ]);

        let shifts: Vec<Shift> = groups.iter().map(|g| g.shift).collect();
        assert_eq!(shifts, Shift::ALL.to_vec());
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].count, 0);
        assert_eq!(groups[2].count, 1);
    }

    #[test]
    fn counts_follow_staff_status_and_role() {
        let members = vec![
            member("waiter", StaffStatus::Active, Shift::Morning),
            member("waiter", StaffStatus::OnLeave, Shift::Morning),
            member("kitchen", StaffStatus::Inactive, Shift::Night),
        ];

        assert_eq!(
            StaffCounts::from_members(&members),
            StaffCounts{ total: 3, active: 1, on_leave: 1, inactive: 1 }
        );
        let by_role = count_by_role(&members);
        assert_eq!(by_role.get("waiter"), Some(&2));
        assert_eq!(by_role.get("kitchen"), Some(&1));
    }

    #[test]
    fn only_active_staff_on_the_current_shift_are_on_duty() {
        let members = vec![
            member("waiter", StaffStatus::Active, Shift::Morning),
            member("waiter", StaffStatus::OnLeave, Shift::Morning),
            member("kitchen", StaffStatus::Active, Shift::Night),
        ];

        assert_eq!(on_duty(&members, 9), 1);
        assert_eq!(on_duty(&members, 23), 1);
        assert_eq!(on_duty(&members, 15), 0);
    }
}

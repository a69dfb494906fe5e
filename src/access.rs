use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{role::Role, status::EmployeeStatus},
    models::Employee,
    schema::{employee_restaurants, employees},
    utils::{run_query, DbError, DbPool}
};

/// The employee behind a request, with the restaurants it is linked to
#[derive(Debug, Clone, Serialize)]
pub struct Actor{
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub restaurants: Vec<Uuid>
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope{
    Global,
    Restaurant(Uuid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action{
    ViewAdminDashboard,
    ManageTenants,
    ManageVendors,
    RecordSnapshot,
    ViewVendors,
    ViewOwnerDashboard,
    ViewManagerDashboard,
    ViewKitchenDashboard,
    UpdateKitchenItem,
    ViewStaffDashboard,
    ViewRestaurant,
    ManageRestaurantData,
    ManageEmployees
}

const ALL_ROLES: &[Role] = &[
    Role::Admin, Role::Owner, Role::Manager, Role::Kitchen, Role::Staff, Role::Waiter
];
const MEMBER_ROLES: &[Role] = &[
    Role::Owner, Role::Manager, Role::Kitchen, Role::Staff, Role::Waiter
];

impl Action {
    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Action::ViewAdminDashboard
            | Action::ManageTenants
            | Action::ManageVendors
            | Action::RecordSnapshot => &[Role::Admin],
            Action::ViewVendors => ALL_ROLES,
            Action::ViewOwnerDashboard => &[Role::Owner],
            Action::ViewManagerDashboard => &[Role::Owner, Role::Manager],
            Action::ViewKitchenDashboard
            | Action::UpdateKitchenItem => &[Role::Kitchen, Role::Manager, Role::Owner],
            Action::ViewStaffDashboard => &[Role::Staff, Role::Waiter, Role::Manager, Role::Owner],
            Action::ViewRestaurant
            | Action::ManageRestaurantData => MEMBER_ROLES,
            Action::ManageEmployees => &[Role::Owner, Role::Manager]
        }
    }

    // Admins may act on any restaurant for these
    pub fn admin_override(&self) -> bool {
        matches!(
            self,
            Action::ViewRestaurant | Action::ManageRestaurantData | Action::ManageEmployees
        )
    }

    // Not tied to a restaurant, only the role matters
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            Action::ViewAdminDashboard
                | Action::ManageTenants
                | Action::ManageVendors
                | Action::RecordSnapshot
                | Action::ViewVendors
        )
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Access denied to this restaurant")]
pub struct AccessDenied;

pub fn has_access(actor: &Actor, restaurant_id: Uuid, roles: Option<&[Role]>) -> bool {
    if !actor.restaurants.contains(&restaurant_id) {
        return false;
    }

    match roles {
        Some(roles) => roles.contains(&actor.role),
        None => true
    }
}

pub fn authorize(actor: &Actor, scope: Scope, action: Action) -> Result<(), AccessDenied> {
    if action.is_global() {
        return if action.permitted_roles().contains(&actor.role) {
            Ok(())
        } else {
            Err(AccessDenied)
        };
    }

    if actor.is_admin() && action.admin_override() {
        return Ok(());
    }

    match scope {
        Scope::Global => Err(AccessDenied),
        Scope::Restaurant(restaurant_id) => {
            if has_access(actor, restaurant_id, Some(action.permitted_roles())) {
                Ok(())
            } else {
                Err(AccessDenied)
            }
        }
    }
}

// For records spanning several restaurants, e.g. employees: one authorized restaurant is enough
pub fn authorize_any(actor: &Actor, restaurants: &[Uuid], action: Action) -> Result<(), AccessDenied> {
    if actor.is_admin() && action.admin_override() {
        return Ok(());
    }

    restaurants
        .iter()
        .find_map(|restaurant_id| authorize(actor, Scope::Restaurant(*restaurant_id), action).ok())
        .ok_or(AccessDenied)
}

/// Restaurants a listing may cover: `None` means every restaurant (admins only)
pub fn visible_restaurants(
    actor: &Actor,
    requested: Option<Uuid>
) -> Result<Option<Vec<Uuid>>, AccessDenied> {
    match requested {
        Some(restaurant_id) => {
            authorize(actor, Scope::Restaurant(restaurant_id), Action::ViewRestaurant)?;
            Ok(Some(vec![restaurant_id]))
        },
        None if actor.is_admin() => Ok(None),
        None => Ok(Some(actor.restaurants.clone()))
    }
}

// Unknown or inactive employees resolve to None
#[tracing::instrument(
    "Loading actor for employee",
    skip(pool)
)]
pub async fn load_actor(pool: &DbPool, employee_id: Uuid) -> Result<Option<Actor>, DbError> {
    run_query(pool, move |conn| {
        let employee = employees::table
            .filter(employees::employee_id.eq(employee_id))
            .filter(employees::status.eq(EmployeeStatus::Active.as_str()))
            .select(Employee::as_select())
            .first::<Employee>(conn)
            .optional()?;

        let Some(employee) = employee else {
            return Ok(None);
        };

        let Ok(role) = employee.role.parse::<Role>() else {
            tracing::warn!(role = %employee.role, "Employee has an unknown role");
            return Ok(None);
        };

        let restaurants = employee_restaurants::table
            .filter(employee_restaurants::employee_id.eq(employee_id))
            .select(employee_restaurants::restaurant_id)
            .load::<Uuid>(conn)?;

        Ok(Some(Actor{
            employee_id,
            name: employee.name,
            email: employee.email,
            role,
            restaurants
        }))
    })
    .await
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};
    use uuid::Uuid;

    use super::*;

    fn actor(role: Role, restaurants: Vec<Uuid>) -> Actor {
        Actor{
            employee_id: Uuid::new_v4(),
            name: "Test Employee".to_string(),
            email: "employee@example.com".to_string(),
            role,
            restaurants
        }
    }

    #[test]
    fn access_requires_membership() {
        let restaurant = Uuid::new_v4();
        let member = actor(Role::Waiter, vec![restaurant]);
        let outsider = actor(Role::Owner, vec![Uuid::new_v4()]);

        assert!(has_access(&member, restaurant, None));
        assert!(!has_access(&outsider, restaurant, None));
    }

    #[test]
    fn access_with_roles_requires_role_in_set() {
        let restaurant = Uuid::new_v4();
        let waiter = actor(Role::Waiter, vec![restaurant]);

        assert!(!has_access(&waiter, restaurant, Some(&[Role::Kitchen, Role::Manager])));
        assert!(has_access(&waiter, restaurant, Some(&[Role::Waiter])));
    }

    #[test]
    fn admin_dashboard_is_admin_only() {
        let admin = actor(Role::Admin, vec![]);
        let owner = actor(Role::Owner, vec![Uuid::new_v4()]);

        assert_ok!(authorize(&admin, Scope::Global, Action::ViewAdminDashboard));
        assert_err!(authorize(&owner, Scope::Global, Action::ViewAdminDashboard));
    }

    #[test]
    fn kitchen_dashboard_rejects_waiters() {
        let restaurant = Uuid::new_v4();
        let waiter = actor(Role::Waiter, vec![restaurant]);
        let cook = actor(Role::Kitchen, vec![restaurant]);
        let scope = Scope::Restaurant(restaurant);

        assert_err!(authorize(&waiter, scope, Action::ViewKitchenDashboard));
        assert_ok!(authorize(&cook, scope, Action::ViewKitchenDashboard));
    }

    #[test]
    fn owner_dashboard_has_no_admin_override() {
        let admin = actor(Role::Admin, vec![]);
        let scope = Scope::Restaurant(Uuid::new_v4());

        assert_err!(authorize(&admin, scope, Action::ViewOwnerDashboard));
        assert_ok!(authorize(&admin, scope, Action::ViewRestaurant));
        assert_ok!(authorize(&admin, scope, Action::ManageEmployees));
    }

    #[test]
    fn member_of_other_restaurant_is_denied() {
        let owner = actor(Role::Owner, vec![Uuid::new_v4()]);
        let result = authorize(&owner, Scope::Restaurant(Uuid::new_v4()), Action::ViewOwnerDashboard);

        assert_eq!(result, Err(AccessDenied));
    }

    #[test]
    fn staff_cannot_manage_employees() {
        let restaurant = Uuid::new_v4();
        let staff = actor(Role::Staff, vec![restaurant]);

        assert_err!(authorize(&staff, Scope::Restaurant(restaurant), Action::ManageEmployees));
    }

    #[test]
    fn shared_restaurant_is_enough_for_multi_restaurant_records() {
        let shared = Uuid::new_v4();
        let manager = actor(Role::Manager, vec![shared]);

        assert_ok!(authorize_any(&manager, &[Uuid::new_v4(), shared], Action::ManageEmployees));
        assert_err!(authorize_any(&manager, &[Uuid::new_v4()], Action::ManageEmployees));
        assert_err!(authorize_any(&manager, &[], Action::ManageEmployees));
    }

    #[test]
    fn listing_without_restaurant_is_scoped_to_memberships() {
        let restaurants = vec![Uuid::new_v4(), Uuid::new_v4()];
        let manager = actor(Role::Manager, restaurants.clone());
        let admin = actor(Role::Admin, vec![]);

        assert_eq!(visible_restaurants(&manager, None), Ok(Some(restaurants)));
        assert_eq!(visible_restaurants(&admin, None), Ok(None));
        assert_err!(visible_restaurants(&manager, Some(Uuid::new_v4())));
    }
}

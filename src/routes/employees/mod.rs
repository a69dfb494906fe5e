use uuid::Uuid;

use crate::{
    access::{authorize, Action, Actor, Scope},
    domain::role::Role,
    error::ApiError
};

mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_employee;
pub use get::{get_employee, list_employees};
pub use post::post_employee;
pub use update::update_employee;

// Only admins hand out admin or owner accounts, or accounts outside any restaurant
fn check_grant(actor: &Actor, role: Option<Role>, restaurants: Option<&[Uuid]>) -> Result<(), ApiError> {
    if actor.is_admin() {
        return Ok(());
    }

    if matches!(role, Some(Role::Admin) | Some(Role::Owner)) {
        return Err(ApiError::Forbidden("Only admins may grant this role".into()));
    }

    if let Some(restaurants) = restaurants {
        if restaurants.is_empty() {
            return Err(ApiError::validation("At least one restaurant is required"));
        }
        for restaurant_id in restaurants {
            authorize(actor, Scope::Restaurant(*restaurant_id), Action::ManageEmployees)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};
    use uuid::Uuid;

    use super::check_grant;
    use crate::{access::Actor, domain::role::Role};

    fn actor(role: Role, restaurants: Vec<Uuid>) -> Actor {
        Actor{
            employee_id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role,
            restaurants
        }
    }

    #[test]
    fn manager_cannot_create_owner() {
        let r = Uuid::new_v4();
        let manager = actor(Role::Manager, vec![r]);

        assert_err!(check_grant(&manager, Some(Role::Owner), Some(&[r])));
        assert_ok!(check_grant(&manager, Some(Role::Waiter), Some(&[r])));
    }

    #[test]
    fn manager_cannot_hire_into_foreign_restaurant() {
        let manager = actor(Role::Manager, vec![Uuid::new_v4()]);
        assert_err!(check_grant(&manager, Some(Role::Kitchen), Some(&[Uuid::new_v4()])));
    }

    #[test]
    fn admin_may_create_unlinked_accounts() {
        let admin = actor(Role::Admin, vec![]);
        assert_ok!(check_grant(&admin, Some(Role::Admin), Some(&[])));
    }
}

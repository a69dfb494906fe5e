text_enum!(
    /// Role of an employee, carried in access tokens and checked by the access policy
    Role, "role" {
        Admin => "admin",
        Owner => "owner",
        Manager => "manager",
        Kitchen => "kitchen",
        Staff => "staff",
        Waiter => "waiter",
    }
);

text_enum!(
    /// The three login endpoints, each accepting its own subset of roles
    LoginPortal, "login portal" {
        Admin => "admin",
        Owner => "owner",
        Staff => "staff",
    }
);

impl LoginPortal {
    pub fn roles(&self) -> &'static [Role] {
        match self {
            LoginPortal::Admin => &[Role::Admin],
            LoginPortal::Owner => &[Role::Owner],
            LoginPortal::Staff => &[Role::Manager, Role::Kitchen, Role::Staff, Role::Waiter],
        }
    }

    pub fn accepts(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use claim::assert_err;

    use super::{LoginPortal, Role};

    #[test]
    fn roles_round_trip_through_text() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), *role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_err!(Role::from_str("vendor"));
        assert_err!(Role::from_str("Admin"));
    }

    #[test]
    fn staff_portal_excludes_admin_and_owner() {
        assert!(LoginPortal::Staff.accepts(Role::Waiter));
        assert!(LoginPortal::Staff.accepts(Role::Kitchen));
        assert!(!LoginPortal::Staff.accepts(Role::Owner));
        assert!(!LoginPortal::Staff.accepts(Role::Admin));
    }

    #[test]
    fn admin_portal_only_accepts_admins() {
        for role in Role::ALL {
            assert_eq!(LoginPortal::Admin.accepts(*role), *role == Role::Admin);
        }
    }
}

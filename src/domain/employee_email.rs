use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct EmployeeEmail(pub String);

impl EmployeeEmail{
    pub fn parse(email: String) -> Result<EmployeeEmail, String>{
        let email = email.trim().to_lowercase();

        if email.validate_email(){
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email", email))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for EmployeeEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};
    use fake::{faker::internet::en::SafeEmail, Fake};
    use rand::{rngs::StdRng, SeedableRng};

    use super::EmployeeEmail;

    #[derive(Debug, Clone)]
    struct ValidEmailFixture(pub String);

    impl quickcheck::Arbitrary for ValidEmailFixture {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let mut rng = StdRng::seed_from_u64(u64::arbitrary(g));
            let email = SafeEmail().fake_with_rng(&mut rng);
            Self(email)
        }
    }

    #[quickcheck_macros::quickcheck]
    fn valid_emails_are_parsed_successfully(valid_email: ValidEmailFixture) -> bool {
        EmployeeEmail::parse(valid_email.0).is_ok()
    }

    #[test]
    fn empty_string_is_rejected() {
        assert_err!(EmployeeEmail::parse("".to_string()));
    }

    #[test]
    fn email_missing_at_symbol_is_rejected() {
        assert_err!(EmployeeEmail::parse("owner.test.com".to_string()));
    }

    #[test]
    fn email_missing_subject_is_rejected() {
        assert_err!(EmployeeEmail::parse("@test.com".to_string()));
    }

    #[test]
    fn email_is_normalised_to_lowercase() {
        let email = EmployeeEmail::parse("  Owner@Test.com ".to_string());
        assert_ok!(&email);
        assert_eq!(email.unwrap().as_ref(), "owner@test.com");
    }
}

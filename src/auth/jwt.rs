use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{configuration::JWTSettings, domain::role::Role};

#[derive(Clone)]
pub struct Tokenizer{
    pub secret: SecretString,
    pub expiry_hours: u64,
    pub refresh_expiry_hours: u64
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType{
    Access,
    Refresh
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims{
    pub sub: Uuid,
    pub exp: usize,
    pub email: String,
    pub role: Role,
    pub token_type: TokenType
}

#[derive(Debug, Serialize)]
pub struct TokenPair{
    pub access_token: String,
    pub refresh_token: String
}

impl Tokenizer {
    pub fn new(settings: &JWTSettings) -> Self {
        Self{
            secret: SecretString::new(settings.secret.clone().into()),
            expiry_hours: settings.expiry_hours,
            refresh_expiry_hours: settings.refresh_expiry_hours
        }
    }

    fn generate_key(
        &self,
        employee_id: Uuid,
        email: &str,
        role: Role,
        token_type: TokenType
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let hours = match token_type {
            TokenType::Access => self.expiry_hours,
            TokenType::Refresh => self.refresh_expiry_hours
        };
        let expiry = Utc::now() + Duration::hours(hours as i64);

        let claims = Claims{
            sub: employee_id,
            exp: expiry.timestamp() as usize,
            email: email.to_string(),
            role,
            token_type
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )
    }

    pub fn issue_pair(
        &self,
        employee_id: Uuid,
        email: &str,
        role: Role
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair{
            access_token: self.generate_key(employee_id, email, role, TokenType::Access)?,
            refresh_token: self.generate_key(employee_id, email, role, TokenType::Refresh)?
        })
    }

    pub fn decode_key(&self, token: &str) -> Option<Claims>{
        match jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        ) {
            Ok(decoded_data) => Some(decoded_data.claims),
            Err(_) => None
        }
    }

    // Decodes only tokens of the expected kind
    pub fn decode_as(&self, token: &str, token_type: TokenType) -> Option<Claims>{
        self.decode_key(token).filter(|claims| claims.token_type == token_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_settings() -> JWTSettings {
        JWTSettings {
            secret: "test_secret".to_string(),
            expiry_hours: 24,
            refresh_expiry_hours: 168
        }
    }

    #[test]
    fn test_tokenizer_new() {
        let settings = create_test_settings();
        let tokenizer = Tokenizer::new(&settings);

        assert_eq!(
            tokenizer.secret.expose_secret(),
            &settings.secret
        );
        assert_eq!(tokenizer.expiry_hours, settings.expiry_hours);
        assert_eq!(tokenizer.refresh_expiry_hours, settings.refresh_expiry_hours);
    }

    #[test]
    fn test_issue_pair_for_waiter() {
        let tokenizer = Tokenizer::new(&create_test_settings());
        let employee_id = Uuid::new_v4();
        let pair = tokenizer.issue_pair(employee_id, "waiter@example.com", Role::Waiter)
            .expect("Failed to issue tokens");

        let claims = tokenizer.decode_key(&pair.access_token).expect("Failed to decode token");

        assert_eq!(claims.sub, employee_id);
        assert_eq!(claims.email, "waiter@example.com");
        assert_eq!(claims.role, Role::Waiter);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let tokenizer = Tokenizer::new(&create_test_settings());
        let pair = tokenizer.issue_pair(Uuid::new_v4(), "owner@example.com", Role::Owner)
            .expect("Failed to issue tokens");

        assert!(tokenizer.decode_as(&pair.refresh_token, TokenType::Access).is_none());
        assert!(tokenizer.decode_as(&pair.refresh_token, TokenType::Refresh).is_some());
        assert!(tokenizer.decode_as(&pair.access_token, TokenType::Refresh).is_none());
    }

    #[test]
    fn test_token_expiry() {
        let tokenizer = Tokenizer::new(&create_test_settings());
        let pair = tokenizer.issue_pair(Uuid::new_v4(), "admin@example.com", Role::Admin)
            .expect("Failed to issue tokens");

        let access = tokenizer.decode_key(&pair.access_token).expect("Failed to decode token");
        let refresh = tokenizer.decode_key(&pair.refresh_token).expect("Failed to decode token");
        let expected_access = Utc::now() + chrono::Duration::hours(24);
        let expected_refresh = Utc::now() + chrono::Duration::hours(168);

        // Allow for small time differences during test execution
        assert!((access.exp as i64 - expected_access.timestamp()).abs() < 5);
        assert!((refresh.exp as i64 - expected_refresh.timestamp()).abs() < 5);
    }

    #[test]
    fn test_decode_invalid_token() {
        let tokenizer = Tokenizer::new(&create_test_settings());
        assert!(tokenizer.decode_key("invalid_token").is_none());
    }

    #[test]
    fn test_decode_token_with_wrong_secret() {
        let tokenizer1 = Tokenizer::new(&JWTSettings {
            secret: "secret1".to_string(),
            expiry_hours: 24,
            refresh_expiry_hours: 168
        });
        let pair = tokenizer1.issue_pair(Uuid::new_v4(), "chef@example.com", Role::Kitchen)
            .expect("Failed to issue tokens");

        let tokenizer2 = Tokenizer::new(&JWTSettings {
            secret: "secret2".to_string(),
            expiry_hours: 24,
            refresh_expiry_hours: 168
        });
        assert!(tokenizer2.decode_key(&pair.access_token).is_none());
    }
}

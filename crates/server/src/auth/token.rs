use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::models::user::UserId;

/// Identity carried by a bearer token. Nothing beyond the user id is embedded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::Malformed)
    }
}

pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, Utc::now(), ttl)
    }

    pub fn issue_at(
        &self,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verifies signature and expiry, returning the embedded claims untouched.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        data.claims.user_id()?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-that-is-long-enough-for-hs256";

    #[test]
    fn verify_returns_issued_claims() {
        let issuer = TokenIssuer::new(SECRET);
        let now = Utc::now();
        let token = issuer.issue_at(42, now, Duration::days(1)).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(
            claims,
            Claims {
                sub: "42".to_string(),
                iat: now.timestamp(),
                exp: (now + Duration::days(1)).timestamp(),
            }
        );
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let issued_at = Utc::now() - Duration::days(2);
        let token = issuer.issue_at(7, issued_at, Duration::days(1)).unwrap();

        assert_eq!(issuer.verify(&token).unwrap_err(), AuthError::ExpiredToken);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let other = TokenIssuer::new(b"some-completely-different-secret-value");
        let token = other.issue(7, Duration::days(1)).unwrap();

        assert_eq!(
            issuer.verify(&token).unwrap_err(),
            AuthError::InvalidSignature
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue(7, Duration::days(1)).unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{unsigned}.{flipped}{}", &signature[1..]);

        assert_eq!(
            issuer.verify(&tampered).unwrap_err(),
            AuthError::InvalidSignature
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let issuer = TokenIssuer::new(SECRET);
        assert_eq!(issuer.verify("abc").unwrap_err(), AuthError::Malformed);
        assert_eq!(issuer.verify("").unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn non_numeric_subject_is_malformed() {
        let issuer = TokenIssuer::new(SECRET);
        let claims = Claims {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(issuer.verify(&token).unwrap_err(), AuthError::Malformed);
    }
}

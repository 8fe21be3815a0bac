//! HMAC-signed JWT implementation of `TokenService`.

use chrono::{DateTime, Duration, Utc};
use domains::{AccountId, Claims, DomainError, IssuedToken, Result, TokenService};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::str::FromStr;

/// Signs and verifies session tokens with a shared secret.
///
/// Only the HMAC family is accepted: the same secret both signs and verifies.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    pub fn new(secret: &str, algorithm: &str, ttl_minutes: i64) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| DomainError::validation(format!("unknown signing algorithm {algorithm}")))?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::validation(format!(
                "{algorithm:?} needs a key pair; only HS256, HS384 and HS512 are supported"
            )));
        }
        if secret.is_empty() {
            return Err(DomainError::validation("signing secret cannot be empty"));
        }
        if ttl_minutes <= 0 {
            return Err(DomainError::validation("token lifetime must be positive"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    fn issue_at(&self, account: AccountId, email: &str, role: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = Claims {
            sub: account,
            email: email.to_string(),
            role: role.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))?;

        Ok(IssuedToken { token, ttl_seconds: self.ttl_seconds() })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: AccountId, email: &str, role: &str) -> Result<IssuedToken> {
        self.issue_at(account, email, role, Utc::now())
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Unauthenticated("Token has expired".into()),
                _ => {
                    tracing::debug!(error = %e, "rejected session token");
                    DomainError::Unauthenticated("Invalid credentials".into())
                }
            })
    }
}

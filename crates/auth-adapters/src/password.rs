//! Argon2id implementation of `PasswordHasher`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use domains::{DomainError, PasswordHasher, Result};

/// Produces PHC strings (`$argon2id$v=19$m=...`), so the cost parameters
/// travel with each hash and verification works across parameter changes.
#[derive(Clone)]
pub struct ArgonHasher {
    argon: Argon2<'static>,
}

impl Default for ArgonHasher {
    fn default() -> Self {
        Self { argon: Argon2::default() }
    }
}

impl ArgonHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom cost: memory in KiB, iterations, lanes.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| DomainError::internal(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }
}

impl PasswordHasher for ArgonHasher {
    fn hash(&self, password: &str) -> Result<String> {
        if password.is_empty() {
            return Err(DomainError::validation("Password cannot be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is not a valid PHC string");
                return false;
            }
        };
        self.argon.verify_password(password.as_bytes(), &parsed_hash).is_ok()
    }
}

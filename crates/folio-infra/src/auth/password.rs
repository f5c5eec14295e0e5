//! Argon2id hashing for the in-memory account store.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use folio_core::ports::{AuthError, PasswordService};

const DECOY_PASSWORD: &str = "folio-decoy-password";

#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
    /// Hash checked when the email has no account.
    decoy: OnceLock<String>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one verification against a throwaway hash, so an unknown email
    /// costs as much as a wrong password.
    pub fn burn(&self, password: &str) {
        let decoy = self
            .decoy
            .get_or_init(|| self.hash(DECOY_PASSWORD).unwrap_or_default());
        let _ = self.verify(password, decoy);
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self.argon2.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("demo-password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify("demo-password", &hash).unwrap());
        assert!(!service.verify("Demo-Password", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(service.verify("x", "plain"), Err(AuthError::HashingError(_))));
    }

    #[test]
    fn test_burn_reuses_one_decoy_hash() {
        let service = Argon2PasswordService::new();

        service.burn("anything");
        let decoy = service.decoy.get().cloned().unwrap();
        service.burn("something else");

        assert_eq!(service.decoy.get(), Some(&decoy));
        assert!(service.verify(DECOY_PASSWORD, &decoy).unwrap());
    }
}

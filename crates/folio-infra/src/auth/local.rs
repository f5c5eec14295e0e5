//! Accounts held in process memory, for running without the hosted backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::ports::{AccountRef, AuthError, AuthProvider, PasswordService, Session};

use super::{Argon2PasswordService, JwtTokenService};
use crate::redact::mask_email;

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    id: Uuid,
    email: String,
    password_hash: String,
}

pub struct LocalAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    passwords: Argon2PasswordService,
    tokens: Arc<JwtTokenService>,
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl LocalAuthProvider {
    pub fn new(tokens: Arc<JwtTokenService>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            passwords: Argon2PasswordService::new(),
            tokens,
        }
    }

    /// Create an account up front, e.g. the demo and owner accounts.
    pub async fn seed(&self, email: &str, password: &str) -> Result<AccountRef, AuthError> {
        let account = self.create(email, password).await?;
        tracing::info!(email = %mask_email(&account.email), "Seeded local account");
        Ok(account)
    }

    async fn create(&self, email: &str, password: &str) -> Result<AccountRef, AuthError> {
        let key = normalize(email);
        if !key.contains('@') {
            return Err(AuthError::Rejected("Unable to validate email address".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash = self.passwords.hash(password)?;
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::AlreadyRegistered);
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: key.clone(),
            password_hash,
        };
        let reference = AccountRef {
            id: account.id,
            email: account.email.clone(),
        };
        accounts.insert(key, account);
        Ok(reference)
    }

    fn session_for(&self, user: AccountRef) -> Result<Session, AuthError> {
        Ok(Session {
            access_token: self.tokens.generate_token(user.id, &user.email)?,
            token_type: "bearer".to_string(),
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let key = normalize(email);
        let stored = self.accounts.read().await.get(&key).map(|account| {
            let user = AccountRef {
                id: account.id,
                email: account.email.clone(),
            };
            (user, account.password_hash.clone())
        });

        // Hashing runs without the lock held.
        let Some((user, password_hash)) = stored else {
            self.passwords.burn(password);
            tracing::info!(email = %mask_email(&key), "Sign in rejected: unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &password_hash)? {
            tracing::info!(email = %mask_email(&key), "Sign in rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(email = %mask_email(&key), "Signed in");
        self.session_for(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = self.create(email, password).await?;
        tracing::info!(email = %mask_email(&user.email), "Account created");
        self.session_for(user)
    }

    /// Local sessions are stateless; the caller discards the token.
    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

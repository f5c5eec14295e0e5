//! Session tokens, password hashing and the in-process account provider.

mod jwt;
mod local;
mod password;

pub use jwt::{JwtConfig, JwtTokenService, SESSION_AUDIENCE};
pub use local::{LocalAuthProvider, MIN_PASSWORD_LEN};
pub use password::Argon2PasswordService;

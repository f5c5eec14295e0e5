//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory repositories only
//! - `hosted` - Repositories and accounts on the hosted backend via reqwest
//! - `auth` - JWT session tokens, Argon2 hashing and local accounts

pub mod memory;
pub mod redact;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "hosted")]
pub mod hosted;

pub use memory::{InMemoryPostRepository, InMemoryTaskRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, LocalAuthProvider};

#[cfg(feature = "hosted")]
pub use hosted::{
    HostedAuthProvider, HostedClient, HostedConfig, HostedPostRepository, HostedTaskRepository,
};

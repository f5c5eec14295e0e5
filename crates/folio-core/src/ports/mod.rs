//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AccountRef, AuthError, AuthProvider, PasswordService, Session, TokenClaims, TokenService};
pub use repository::{BaseRepository, PostRepository, TaskRepository};

//! In-memory repositories - used when no hosted backend is configured.
//!
//! Data is lost on process restart.

mod base;
mod post;
mod task;

pub use base::{InMemoryRepository, StoredEntity};
pub use post::InMemoryPostRepository;
pub use task::InMemoryTaskRepository;

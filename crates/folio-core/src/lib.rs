//! # Folio Core
//!
//! The domain layer of the Folio site: posts, tasks, the per-request viewer
//! context, and the content summarization used by the blog listing.
//! This crate has no infrastructure dependencies.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;

pub use content::{ContentFormat, ExcerptOptions, compute_excerpt, compute_read_time};
pub use error::DomainError;

//! # Folio Shared
//!
//! Wire types for the Folio HTTP API: request bodies, the listing and board
//! views, and the standard response envelopes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};

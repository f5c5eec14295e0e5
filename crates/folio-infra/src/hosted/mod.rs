//! Client for the hosted backend-as-a-service.
//!
//! Rows live behind a PostgREST-style REST interface (`/rest/v1/<table>`),
//! sessions behind a GoTrue-style auth interface (`/auth/v1`). This module
//! only translates between those interfaces and the ports in `folio-core`.

mod auth;
mod client;
mod query;
mod rows;
mod table;

pub use auth::HostedAuthProvider;
pub use client::{HostedClient, HostedConfig};
pub use query::HostedQuery;
pub use rows::{PostsTable, TasksTable};
pub use table::{HostedPostRepository, HostedRepository, HostedTable, HostedTaskRepository};

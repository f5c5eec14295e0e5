//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use folio_core::ports::{AuthProvider, PostRepository, TaskRepository, TokenService};
use folio_core::{ContentFormat, ExcerptOptions};
use folio_infra::redact::mask_email;
use folio_infra::{
    InMemoryPostRepository, InMemoryTaskRepository, JwtConfig, JwtTokenService, LocalAuthProvider,
};

#[cfg(feature = "hosted")]
use folio_infra::{HostedAuthProvider, HostedClient, HostedPostRepository, HostedTaskRepository};

use crate::config::{AccountSeed, AppConfig, BackendConfig};

/// How post content is summarized for listings.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub format: ContentFormat,
    pub excerpt: ExcerptOptions,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub accounts: Arc<dyn AuthProvider>,
    pub tokens: Arc<dyn TokenService>,
    pub content: ContentSettings,
    pub demo_email: String,
    /// `"hosted"` or `"memory"`, reported by the health check.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let content = ContentSettings {
            format: config.content_format,
            excerpt: config.excerpt.clone(),
        };

        let state = match &config.backend {
            #[cfg(feature = "hosted")]
            BackendConfig::Hosted(hosted) => {
                let client =
                    HostedClient::new(hosted).context("failed to build the hosted client")?;
                tracing::info!("Using the hosted backend for posts, tasks and accounts");

                Self {
                    posts: Arc::new(HostedPostRepository::new(client.clone())),
                    tasks: Arc::new(HostedTaskRepository::new(client.clone())),
                    accounts: Arc::new(HostedAuthProvider::new(client)),
                    tokens: Arc::new(JwtTokenService::new(JwtConfig::hosted(
                        hosted.jwt_secret.clone(),
                    ))),
                    content,
                    demo_email: config.demo.email.clone(),
                    backend: "hosted",
                }
            }
            BackendConfig::Local {
                jwt_secret,
                jwt_expiration_hours,
                owner,
            } => {
                tracing::warn!("No hosted backend configured. Running in in-memory mode.");

                let tokens = Arc::new(JwtTokenService::new(JwtConfig::local(
                    jwt_secret.clone(),
                    *jwt_expiration_hours,
                )));
                let accounts = LocalAuthProvider::new(tokens.clone());
                seed(&accounts, &config.demo).await?;
                if let Some(owner) = owner {
                    seed(&accounts, owner).await?;
                }

                Self::in_memory(Arc::new(accounts), tokens, content, &config.demo.email)
            }
        };

        tracing::info!(
            backend = state.backend,
            content_format = %state.content.format,
            "Application state initialized"
        );
        Ok(state)
    }

    /// In-memory repositories with the given account provider.
    pub fn in_memory(
        accounts: Arc<dyn AuthProvider>,
        tokens: Arc<dyn TokenService>,
        content: ContentSettings,
        demo_email: &str,
    ) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            accounts,
            tokens,
            content,
            demo_email: demo_email.to_string(),
            backend: "memory",
        }
    }
}

async fn seed(accounts: &LocalAuthProvider, account: &AccountSeed) -> anyhow::Result<()> {
    accounts
        .seed(&account.email, &account.password)
        .await
        .with_context(|| format!("failed to seed account {}", mask_email(&account.email)))?;
    Ok(())
}

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
#[cfg(feature = "hosted")]
use std::time::Duration;

#[cfg(feature = "hosted")]
use anyhow::bail;
use folio_core::{ContentFormat, ExcerptOptions};

#[cfg(feature = "hosted")]
use folio_infra::HostedConfig;

pub const DEFAULT_DEMO_EMAIL: &str = "test@test.com";
pub const DEFAULT_DEMO_PASSWORD: &str = "test123";
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// An account created at startup when running on local accounts.
#[derive(Debug, Clone)]
pub struct AccountSeed {
    pub email: String,
    pub password: String,
}

/// Where posts, tasks and accounts live.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    #[cfg(feature = "hosted")]
    Hosted(HostedConfig),
    /// In-memory storage with locally issued sessions.
    Local {
        jwt_secret: String,
        jwt_expiration_hours: i64,
        owner: Option<AccountSeed>,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub content_format: ContentFormat,
    pub excerpt: ExcerptOptions,
    pub demo: AccountSeed,
    pub backend: BackendConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let content_format = match lookup("CONTENT_FORMAT") {
            Some(value) => ContentFormat::from_str(&value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to markdown content");
                ContentFormat::Markdown
            }),
            None => ContentFormat::default(),
        };

        let defaults = ExcerptOptions::default();
        let excerpt = ExcerptOptions {
            max_chars: parsed(&lookup, "EXCERPT_MAX_CHARS").unwrap_or(defaults.max_chars),
            sentence_floor: parsed(&lookup, "EXCERPT_SENTENCE_FLOOR").unwrap_or(defaults.sentence_floor),
            ..defaults
        };

        let demo = AccountSeed {
            email: lookup("DEMO_EMAIL").unwrap_or_else(|| DEFAULT_DEMO_EMAIL.to_string()),
            password: lookup("DEMO_PASSWORD").unwrap_or_else(|| DEFAULT_DEMO_PASSWORD.to_string()),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            content_format,
            excerpt,
            demo,
            backend: Self::backend(&lookup)?,
        })
    }

    #[cfg(feature = "hosted")]
    fn backend(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<BackendConfig> {
        let Some(url) = lookup("HOSTED_URL") else {
            return Ok(Self::local_backend(lookup));
        };

        // Session tokens are verified against this secret.
        let jwt_secret = lookup("HOSTED_JWT_SECRET").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            bail!("HOSTED_JWT_SECRET must be set when HOSTED_URL is configured");
        }

        let api_key = lookup("HOSTED_API_KEY").unwrap_or_default();
        Ok(BackendConfig::Hosted(HostedConfig {
            url,
            service_key: lookup("HOSTED_SERVICE_KEY").unwrap_or_else(|| api_key.clone()),
            api_key,
            jwt_secret,
            timeout: Duration::from_secs(10),
        }))
    }

    #[cfg(not(feature = "hosted"))]
    fn backend(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<BackendConfig> {
        Ok(Self::local_backend(lookup))
    }

    fn local_backend(lookup: &impl Fn(&str) -> Option<String>) -> BackendConfig {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            DEFAULT_JWT_SECRET.to_string()
        });

        let owner = match (lookup("OWNER_EMAIL"), lookup("OWNER_PASSWORD")) {
            (Some(email), Some(password)) => Some(AccountSeed { email, password }),
            _ => None,
        };

        BackendConfig::Local {
            jwt_secret,
            jwt_expiration_hours: parsed(lookup, "JWT_EXPIRATION_HOURS").unwrap_or(24),
            owner,
        }
    }
}

/// A numeric variable; unset or malformed values read as `None`.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        load(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.content_format, ContentFormat::Markdown);
        assert_eq!(config.excerpt, ExcerptOptions::default());
        assert_eq!(config.demo.email, DEFAULT_DEMO_EMAIL);
        assert!(matches!(config.backend, BackendConfig::Local { owner: None, .. }));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[
            ("PORT", "eighty"),
            ("CONTENT_FORMAT", "rst"),
            ("EXCERPT_MAX_CHARS", "-3"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.content_format, ContentFormat::Markdown);
        assert_eq!(config.excerpt.max_chars, 200);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("CONTENT_FORMAT", "HTML"),
            ("EXCERPT_MAX_CHARS", "120"),
            ("EXCERPT_SENTENCE_FLOOR", "80"),
            ("OWNER_EMAIL", "me@example.com"),
            ("OWNER_PASSWORD", "owner-pass"),
        ]);

        assert_eq!(config.content_format, ContentFormat::Html);
        assert_eq!(config.excerpt.max_chars, 120);
        assert_eq!(config.excerpt.sentence_floor, 80);
        let BackendConfig::Local { owner: Some(owner), .. } = config.backend else {
            panic!("expected a local backend with an owner");
        };
        assert_eq!(owner.email, "me@example.com");
    }

    #[cfg(feature = "hosted")]
    #[test]
    fn test_hosted_backend() {
        let config = config(&[
            ("HOSTED_URL", "https://project.example.co"),
            ("HOSTED_API_KEY", "anon"),
            ("HOSTED_JWT_SECRET", "jwt"),
        ]);

        let BackendConfig::Hosted(hosted) = config.backend else {
            panic!("expected the hosted backend");
        };
        assert_eq!(hosted.service_key, "anon");
        assert_eq!(hosted.jwt_secret, "jwt");
    }

    #[cfg(feature = "hosted")]
    #[test]
    fn test_hosted_backend_requires_a_jwt_secret() {
        let url = ("HOSTED_URL", "https://project.example.co");

        let missing = load(&[url, ("HOSTED_API_KEY", "anon")]).unwrap_err();
        assert!(missing.to_string().contains("HOSTED_JWT_SECRET"));
        assert!(load(&[url, ("HOSTED_JWT_SECRET", "   ")]).is_err());
    }

    #[test]
    fn test_local_backend_needs_no_hosted_secret() {
        assert!(load(&[("HOSTED_JWT_SECRET", "")]).is_ok());
    }
}

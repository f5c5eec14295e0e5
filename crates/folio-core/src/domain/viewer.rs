//! Per-request viewer context.
//!
//! Session and theme preference are resolved once per request and passed
//! explicitly to whatever renders a response.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The signed-in account behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    /// Demo accounts may browse and use the board but not author posts.
    pub is_demo: bool,
}

impl Identity {
    pub fn new(user_id: Uuid, email: String, demo_email: &str) -> Self {
        let is_demo = email.eq_ignore_ascii_case(demo_email);
        Self {
            user_id,
            email,
            is_demo,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(DomainError::Validation(format!("unknown theme `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub identity: Option<Identity>,
    pub theme: Theme,
}

impl Viewer {
    pub fn anonymous(theme: Theme) -> Self {
        Self {
            identity: None,
            theme,
        }
    }

    pub fn signed_in(identity: Identity, theme: Theme) -> Self {
        Self {
            identity: Some(identity),
            theme,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn can_manage_posts(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| !i.is_demo)
    }

    pub fn can_manage_tasks(&self) -> bool {
        self.is_signed_in()
    }

    pub fn require_signed_in(&self) -> Result<&Identity, DomainError> {
        self.identity.as_ref().ok_or(DomainError::Unauthorized)
    }

    /// Identity allowed to create, edit or delete posts.
    pub fn require_post_author(&self) -> Result<&Identity, DomainError> {
        let identity = self.require_signed_in()?;
        if identity.is_demo {
            return Err(DomainError::Forbidden("the demo account cannot manage posts"));
        }
        Ok(identity)
    }
}

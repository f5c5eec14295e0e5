use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use folio_core::ports::{AccountRef, AuthError, AuthProvider, Session};

use super::HostedClient;
use crate::redact::mask_email;

/// Account provider backed by the hosted auth interface.
pub struct HostedAuthProvider {
    client: HostedClient,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
    user: UserBody,
}

/// Sign-up answers with a session, or with the bare user while the address
/// awaits confirmation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn text(&self) -> String {
        [&self.error_description, &self.msg, &self.message, &self.error_code]
            .into_iter()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_default()
    }
}

fn bearer() -> String {
    "bearer".to_string()
}

impl SessionBody {
    fn into_session(self, fallback_email: &str) -> Session {
        Session {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
            user: AccountRef {
                id: self.user.id,
                email: self.user.email.unwrap_or_else(|| fallback_email.to_string()),
            },
        }
    }
}

/// Map an error reply from the auth interface.
fn auth_error(status: StatusCode, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let text = parsed.text();
    let lowered = text.to_ascii_lowercase();

    if lowered.contains("already registered") || parsed.error_code.as_deref() == Some("user_already_exists") {
        return AuthError::AlreadyRegistered;
    }
    if lowered.contains("invalid login credentials")
        || matches!(parsed.error_code.as_deref(), Some("invalid_credentials"))
    {
        return AuthError::InvalidCredentials;
    }
    if lowered.contains("email not confirmed") {
        return AuthError::ConfirmationPending;
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AuthError::InvalidToken(text);
    }
    if status.is_client_error() && !text.is_empty() {
        return AuthError::Rejected(text);
    }
    if text.is_empty() {
        AuthError::Provider(status.to_string())
    } else {
        AuthError::Provider(format!("{status}: {text}"))
    }
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Provider(err.to_string())
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(auth_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| AuthError::Provider(format!("unexpected auth reply: {e}")))
}

impl HostedAuthProvider {
    pub fn new(client: HostedClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthProvider for HostedAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .auth("token")
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let session = read_body::<SessionBody>(response).await.inspect_err(|e| {
            tracing::info!(email = %mask_email(email), error = %e, "Sign in rejected");
        })?;

        tracing::info!(email = %mask_email(email), "Signed in");
        Ok(session.into_session(email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .auth("signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        match read_body::<SignUpBody>(response).await? {
            SignUpBody::Session(session) => {
                tracing::info!(email = %mask_email(email), "Account created");
                Ok(session.into_session(email))
            }
            SignUpBody::User(user) => {
                tracing::info!(email = %mask_email(email), user_id = %user.id, "Account awaiting confirmation");
                Err(AuthError::ConfirmationPending)
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .auth("logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(auth_error(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_reply_without_session_is_a_user() {
        let body: SignUpBody = serde_json::from_str(
            r#"{"id":"8d7c5a4e-2b1f-4e0a-9c3d-6f5e4d3c2b1a","email":"new@example.com","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(body, SignUpBody::User(_)));
    }

    #[test]
    fn test_session_reply() {
        let body: SignUpBody = serde_json::from_str(
            r#"{"access_token":"tok","token_type":"bearer","expires_in":3600,"refresh_token":"r",
                "user":{"id":"8d7c5a4e-2b1f-4e0a-9c3d-6f5e4d3c2b1a","email":"a@b.co"}}"#,
        )
        .unwrap();

        let SignUpBody::Session(session) = body else {
            panic!("expected a session");
        };
        let session = session.into_session("unused@b.co");
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.email, "a@b.co");
    }

    #[test]
    fn test_error_mapping() {
        let invalid = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert!(matches!(auth_error(StatusCode::BAD_REQUEST, invalid), AuthError::InvalidCredentials));

        let taken = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert!(matches!(
            auth_error(StatusCode::UNPROCESSABLE_ENTITY, taken),
            AuthError::AlreadyRegistered
        ));

        let unconfirmed = r#"{"error_description":"Email not confirmed"}"#;
        assert!(matches!(
            auth_error(StatusCode::BAD_REQUEST, unconfirmed),
            AuthError::ConfirmationPending
        ));

        let weak = r#"{"code":422,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#;
        assert!(matches!(
            auth_error(StatusCode::UNPROCESSABLE_ENTITY, weak),
            AuthError::Rejected(msg) if msg.starts_with("Password should")
        ));

        assert!(matches!(
            auth_error(StatusCode::BAD_GATEWAY, "<html>"),
            AuthError::Provider(_)
        ));
    }
}

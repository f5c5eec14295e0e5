//! Viewer extraction: the optional session and the theme preference.

use std::future::{Ready, ready};
use std::ops::Deref;
use std::str::FromStr;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use folio_core::domain::{Identity, Theme, Viewer};
use folio_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie holding the theme preference.
pub const THEME_COOKIE: &str = "theme";

/// The viewer of the current request, plus the bearer token it presented.
///
/// Requests without a usable session resolve to an anonymous viewer;
/// handlers decide what an anonymous viewer may do.
/// ```ignore
/// async fn create(viewer: RequestViewer) -> AppResult<HttpResponse> {
///     let author = viewer.require_post_author()?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestViewer {
    pub viewer: Viewer,
    token: Option<String>,
}

impl RequestViewer {
    /// Token of a validated session.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl Deref for RequestViewer {
    type Target = Viewer;

    fn deref(&self) -> &Viewer {
        &self.viewer
    }
}

fn bearer_token(req: &HttpRequest) -> Result<Option<&str>, AuthError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|t| Some(t.trim()))
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn theme(req: &HttpRequest) -> Theme {
    req.cookie(THEME_COOKIE)
        .and_then(|c| Theme::from_str(c.value()).ok())
        .unwrap_or_default()
}

fn resolve(req: &HttpRequest) -> Result<RequestViewer, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;
    let theme = theme(req);

    let anonymous = || RequestViewer {
        viewer: Viewer::anonymous(theme),
        token: None,
    };

    let token = match bearer_token(req) {
        Ok(Some(token)) => token,
        Ok(None) => return Ok(anonymous()),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed authorization header");
            return Ok(anonymous());
        }
    };

    match state.tokens.validate_token(token) {
        Ok(claims) => {
            let identity = Identity::new(claims.user_id, claims.email, &state.demo_email);
            Ok(RequestViewer {
                viewer: Viewer::signed_in(identity, theme),
                token: Some(token.to_string()),
            })
        }
        Err(e) => {
            tracing::debug!(error = %e, "Treating request with rejected token as anonymous");
            Ok(anonymous())
        }
    }
}

impl FromRequest for RequestViewer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use folio_infra::{JwtConfig, JwtTokenService, LocalAuthProvider};
    use uuid::Uuid;

    use super::*;
    use crate::state::ContentSettings;

    fn state(tokens: Arc<JwtTokenService>) -> web::Data<AppState> {
        let accounts = Arc::new(LocalAuthProvider::new(tokens.clone()));
        let content = ContentSettings {
            format: Default::default(),
            excerpt: Default::default(),
        };
        web::Data::new(AppState::in_memory(accounts, tokens, content, "test@test.com"))
    }

    fn tokens() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(JwtConfig::local("viewer-test", 1)))
    }

    #[test]
    fn test_anonymous_with_theme_cookie() {
        let req = TestRequest::default()
            .app_data(state(tokens()))
            .cookie(Cookie::new(THEME_COOKIE, "dark"))
            .to_http_request();

        let viewer = resolve(&req).unwrap();
        assert!(!viewer.is_signed_in());
        assert_eq!(viewer.theme, Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_system() {
        let req = TestRequest::default()
            .app_data(state(tokens()))
            .cookie(Cookie::new(THEME_COOKIE, "sepia"))
            .to_http_request();

        assert_eq!(resolve(&req).unwrap().theme, Theme::System);
    }

    #[test]
    fn test_demo_session_is_flagged() {
        let tokens = tokens();
        let token = tokens.generate_token(Uuid::new_v4(), "Test@Test.com").unwrap();
        let req = TestRequest::default()
            .app_data(state(tokens))
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let viewer = resolve(&req).unwrap();
        assert!(viewer.is_signed_in());
        assert!(!viewer.can_manage_posts());
        assert!(viewer.can_manage_tasks());
        assert_eq!(viewer.token(), Some(token.as_str()));
    }

    #[test]
    fn test_rejected_token_is_anonymous() {
        let req = TestRequest::default()
            .app_data(state(tokens()))
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
            .to_http_request();

        let viewer = resolve(&req).unwrap();
        assert!(!viewer.is_signed_in());
        assert_eq!(viewer.token(), None);
    }
}

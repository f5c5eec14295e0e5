//! Session handlers.

use actix_web::{HttpResponse, web};

use folio_core::ports::AuthError;
use folio_infra::redact::mask_email;
use folio_shared::ApiResponse;
use folio_shared::dto::{SessionResponse, SignInRequest, SignUpRequest};

use crate::middleware::auth::RequestViewer;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required.".to_string()));
    }
    Ok(())
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req.email, &req.password)?;

    let session = state.accounts.sign_in(req.email.trim(), &req.password).await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// POST /api/auth/sign-up
///
/// 201 with a session, or 202 when the provider waits for the address to be
/// confirmed.
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req.email, &req.password)?;

    match state.accounts.sign_up(req.email.trim(), &req.password).await {
        Ok(session) => Ok(HttpResponse::Created().json(SessionResponse::from(session))),
        Err(AuthError::ConfirmationPending) => {
            tracing::info!(email = %mask_email(&req.email), "Sign up awaiting confirmation");
            Ok(HttpResponse::Accepted().json(ApiResponse::ok_with_message(
                (),
                "Check your inbox to confirm your email address.",
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/auth/sign-out - requires a session
pub async fn sign_out(
    state: web::Data<AppState>,
    viewer: RequestViewer,
) -> AppResult<HttpResponse> {
    viewer.require_signed_in()?;
    let token = viewer.token().ok_or(AuthError::MissingAuth)?;

    state.accounts.sign_out(token).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/session - what the current request may do
pub async fn session(viewer: RequestViewer) -> HttpResponse {
    HttpResponse::Ok().json(views::viewer(&viewer))
}

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};

use folio_shared::dto::ThemeRequest;

use crate::middleware::auth::{RequestViewer, THEME_COOKIE};
use crate::views;

/// PUT /api/preferences/theme - stored client-side in the `theme` cookie
pub async fn set_theme(mut viewer: RequestViewer, body: web::Json<ThemeRequest>) -> HttpResponse {
    let theme = body.into_inner().theme;
    viewer.viewer.theme = theme;

    let cookie = Cookie::build(THEME_COOKIE, theme.as_str())
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .finish();

    HttpResponse::Ok().cookie(cookie).json(views::viewer(&viewer))
}

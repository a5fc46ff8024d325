use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::auth;
use crate::error::Error;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

/// Name of the session cookie set on login.
pub(super) const SESSION_COOKIE: &str = "access_token";

/// Extractor for authenticated routes. Resolves the session token (cookie
/// first, then the `Authorization` header) to a stored user, rejecting the
/// request with 401 otherwise.
pub(super) struct AuthUser(pub crate::store::User);

#[async_trait::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = APIError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .map(ToString::to_string)
            })
            .ok_or(Error::Unauthorized)?;

        let claims = auth::verify_token(&token, state.config.session_secret.as_bytes())
            .map_err(|_| Error::Unauthorized)?;
        let user = state
            .store
            .read()
            .await
            .user_by_username(&claims.sub)
            .await
            .ok_or(Error::Unauthorized)?;
        Ok(AuthUser(user))
    }
}

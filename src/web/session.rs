//! Signed session cookie carrying the session store key

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "edutube_session";

/// Returns the session key from the cookie, issuing a new cookie when absent.
pub fn session_key(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        let key = cookie.value().to_string();
        return (jar, key);
    }

    let key = Uuid::new_v4().to_string();
    tracing::debug!("[SESSION] Issuing new session {}", key);
    let cookie = Cookie::build((SESSION_COOKIE_NAME, key.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), key)
}

/// 302 Found
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

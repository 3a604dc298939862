use axum::http::header;
use axum::response::AppendHeaders;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

fn session_cookie(name: &str, value: &str) -> String {
    format!("{}={}; HttpOnly; Secure; SameSite=Strict; Path=/", name, value)
}

fn expired_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0", name)
}

/// `Set-Cookie` headers carrying a freshly issued token pair
pub fn set_session(
    access_token: &str,
    refresh_token: &str,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (header::SET_COOKIE, session_cookie(ACCESS_COOKIE, access_token)),
        (header::SET_COOKIE, session_cookie(REFRESH_COOKIE, refresh_token)),
    ])
}

/// `Set-Cookie` headers that make the client drop both tokens
pub fn clear_session() -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (header::SET_COOKIE, expired_cookie(ACCESS_COOKIE)),
        (header::SET_COOKIE, expired_cookie(REFRESH_COOKIE)),
    ])
}

//! `CustomerToken` 세션 쿠키 생성/삭제

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use crate::config::CookieConfig;

/// http-only 세션 쿠키
///
/// secure 모드(운영)에서는 스토어프론트가 다른 도메인에 있어도 전송되도록
/// `SameSite=None`을 사용합니다.
pub fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    let secure = CookieConfig::secure();

    Cookie::build(CookieConfig::SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(if secure { SameSite::None } else { SameSite::Lax })
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// 브라우저에서 세션 쿠키를 지우는 만료 쿠키
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(CookieConfig::SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("jwt".to_string(), 3600);
        assert_eq!(cookie.name(), "CustomerToken");
        assert_eq!(cookie.value(), "jwt");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the HTTP-only cookie carrying the refresh credential.
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Build the refresh-credential cookie.
///
/// HttpOnly keeps the credential away from scripts; `SameSite=None` plus
/// Secure lets a cross-site frontend send it with credentialed requests.
pub fn refresh_cookie(credential: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, credential))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

/// Cookie that clears the refresh credential. Attributes must match the
/// issuing cookie or browsers keep the original.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((REFRESH_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_cookie_is_locked_down() {
        let cookie = refresh_cookie("credential".to_string(), 604_800);
        assert_eq!(cookie.name(), REFRESH_COOKIE_NAME);
        assert_eq!(cookie.value(), "credential");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), REFRESH_COOKIE_NAME);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}

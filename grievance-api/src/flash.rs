/// Transient flash notices
///
/// Every recoverable outcome in the portal (registration result, bad
/// credentials, submission reference ID, status updates) is surfaced as a
/// redirect plus a one-shot human-readable notice. The notice rides in a
/// short-lived cookie, set on the redirect and removed by the next page
/// render.
///
/// Notice text contains spaces and punctuation, so the cookie value is
/// base64-encoded to stay within the cookie grammar.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Name of the cookie carrying the pending flash notice
pub const FLASH_COOKIE: &str = "grievance_flash";

/// Builds a flash cookie carrying the given notice
pub fn flash_cookie(message: &str) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, URL_SAFE_NO_PAD.encode(message)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Adds a flash notice to the jar
pub fn set_flash(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(flash_cookie(message))
}

/// Takes the pending flash notice, if any, removing it from the jar
///
/// Undecodable values (hand-edited cookies) are dropped silently.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).and_then(|cookie| {
        let bytes = URL_SAFE_NO_PAD.decode(cookie.value()).ok()?;
        String::from_utf8(bytes).ok()
    });

    let removal = Cookie::build((FLASH_COOKIE, "")).path("/").build();
    (jar.remove(removal), message)
}

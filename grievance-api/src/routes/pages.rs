/// Public pages
///
/// # Endpoints
///
/// - `GET /` - Landing page

use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::{flash::take_flash, views};

/// Landing page handler
pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    let page = views::index_page(flash.as_deref());
    (jar, page)
}

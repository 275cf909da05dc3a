//! Login URLs
//!
//! The OAuth handshake is owned by the backend. The client only points the
//! system browser at `/login` and lets the backend redirect to GitHub and
//! back to `/auth/callback`.

use super::endpoint;
use crate::error::Result;
use url::Url;

/// `{base}/login`, with `force_login=true` to skip any existing session
pub fn login_url(base: &Url, force: bool) -> Result<Url> {
    let mut url = endpoint(base, "login")?;
    if force {
        url.query_pairs_mut().append_pair("force_login", "true");
    }
    Ok(url)
}

/// `{base}/auth/callback`, the redirect target registered with GitHub
pub fn callback_url(base: &Url) -> Result<Url> {
    endpoint(base, "auth/callback")
}

/// Open the login page in the system browser
pub fn open_login(base: &Url, force: bool) -> Result<Url> {
    let url = login_url(base, force)?;
    tracing::info!(%url, force, "Opening login page");
    open::that(url.as_str())?;
    Ok(url)
}

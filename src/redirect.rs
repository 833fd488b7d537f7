use anyhow::{Context, Result};
use reqwest::Url;

use crate::types::profile::CanonicalProfile;

const EMPTY_USERDATA: &str = "{}";

/// Builds the handoff URL carrying the session as query parameters.
///
/// Exactly three parameters are appended, in this order: `jwt` (the raw
/// token), `browser_url` (the origin API base), and `userdata` (the profile
/// as JSON text). `userdata` is always valid JSON, an absent profile or a
/// serialization failure degrades to the empty object.
pub fn build_redirect_url(
    base: &Url,
    browser_url: &str,
    token: &str,
    profile: Option<&CanonicalProfile>,
) -> Url {
    let userdata = match profile {
        Some(profile) => {
            serde_json::to_string(profile).unwrap_or_else(|_| String::from(EMPTY_USERDATA))
        }
        None => String::from(EMPTY_USERDATA),
    };

    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("jwt", token)
        .append_pair("browser_url", browser_url)
        .append_pair("userdata", &userdata);
    url
}

/// Hands control to the receiving application by opening the URL with the
/// system handler.
pub fn navigate(url: &Url) -> Result<()> {
    open::that(url.as_str()).with_context(|| format!("open '{url}' in browser"))
}

use anyhow::Result;
use log::{debug, info};
use reqwest::Url;
use thiserror::Error;

use crate::client::{AuthBackend, RequestError};
use crate::config::Config;
use crate::redirect::build_redirect_url;
use crate::session::{persist_session, persist_token, SessionStore};
use crate::types::auth::extract_token;
use crate::types::profile::CanonicalProfile;

const GENERIC_REJECTED: &str = "Login failed, please check your credentials";

/// The conditions that halt a login attempt. Everything else (profile
/// unavailable, storage failure) degrades gracefully and the flow still
/// produces a handoff URL.
#[derive(Error, Debug)]
pub enum LoginError {
    /// The server rejected the credentials. Carries the server's `detail`
    /// message when it provided one, a generic fallback otherwise.
    #[error("{0}")]
    CredentialsRejected(String),

    /// The server accepted the login but returned no recognizable token.
    #[error("login succeeded but the server did not return a token")]
    TokenMissing,

    /// The login request itself could not be completed. The cause is logged
    /// for diagnostics, never shown raw to the user.
    #[error("could not reach the authentication server")]
    Connectivity(#[source] anyhow::Error),
}

/// Form-supplied credentials. Consumed by [`LoginFlow::run`] and never
/// persisted anywhere.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
    extra: Vec<(String, String)>,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            extra: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_string(), value.to_string()));
        self
    }

    fn into_form(self) -> Vec<(String, String)> {
        let mut form = vec![
            (String::from("username"), self.username),
            (String::from("password"), self.password),
        ];
        form.extend(self.extra);
        form
    }
}

/// Drives the whole handshake: authenticate, extract the token, resolve the
/// profile over the candidate chain, cache the session, build the handoff
/// URL.
pub struct LoginFlow<'a, B, S> {
    cfg: &'a Config,
    redirect_base: Url,
    backend: &'a B,
    store: &'a S,
}

impl<'a, B: AuthBackend, S: SessionStore> LoginFlow<'a, B, S> {
    pub fn new(cfg: &'a Config, backend: &'a B, store: &'a S) -> Result<Self> {
        let redirect_base = cfg.parse_redirect_url()?;
        Ok(Self {
            cfg,
            redirect_base,
            backend,
            store,
        })
    }

    pub async fn run(&self, creds: Credentials) -> Result<Url, LoginError> {
        let form = creds.into_form();
        let resp = match self.backend.login_form(&self.cfg.login_path, &form).await {
            Ok(resp) => resp,
            Err(RequestError::Status { code, detail }) => {
                debug!("Login rejected with status {code}");
                let message = detail.unwrap_or_else(|| String::from(GENERIC_REJECTED));
                return Err(LoginError::CredentialsRejected(message));
            }
            Err(err) => {
                debug!("Login request failed: {err:#}");
                return Err(LoginError::Connectivity(err.into()));
            }
        };

        let token = match extract_token(&resp) {
            Some(token) => token.to_string(),
            None => return Err(LoginError::TokenMissing),
        };
        info!("Login succeeded, token acquired");

        // The token is cached before profile resolution so it survives even
        // if every candidate fails.
        persist_token(self.store, &token);

        let profile = resolve_profile(self.backend, &self.cfg.profile_paths, &token).await;
        if let Some(ref profile) = profile {
            persist_session(self.store, &token, profile);
        }

        Ok(build_redirect_url(
            &self.redirect_base,
            self.cfg.get_browser_url(),
            &token,
            profile.as_ref(),
        ))
    }
}

/// Tries the candidate endpoints strictly in order and normalizes the first
/// successful body. Individual candidate failures are logged and absorbed;
/// all candidates failing yields [`None`], which is not an error.
pub async fn resolve_profile<B: AuthBackend>(
    backend: &B,
    candidates: &[String],
    token: &str,
) -> Option<CanonicalProfile> {
    for path in candidates {
        match backend.fetch_profile(path, token).await {
            Ok(raw) => {
                debug!("Profile candidate '{path}' succeeded");
                return Some(CanonicalProfile::normalize(raw));
            }
            Err(err) => {
                debug!("Profile candidate '{path}' failed: {err:#}");
            }
        }
    }

    info!("No profile candidate succeeded, continuing without profile");
    None
}

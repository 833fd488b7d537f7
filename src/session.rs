use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use crate::filelock::{read_file_lock, write_file_lock};
use crate::types::profile::CanonicalProfile;

const TOKEN_FILE: &str = "token";
const PROFILE_FILE: &str = "profile.json";

/// Durable storage for the login session. Writes are a convenience cache,
/// the handoff URL carries the same data, so callers treat failures as
/// non-fatal through [`persist_token`] and [`persist_session`].
pub trait SessionStore {
    fn write_token(&self, token: &str) -> Result<()>;
    fn write_profile(&self, profile: &CanonicalProfile) -> Result<()>;
    fn clear_profile(&self) -> Result<()>;
}

/// Stores the token once a login succeeded, dropping any profile left over
/// from an earlier session so the store never pairs a fresh token with an
/// outdated profile. Failures are logged and discarded.
pub fn persist_token<S: SessionStore>(store: &S, token: &str) {
    if let Err(err) = store.write_token(token) {
        warn!("Failed to store token: {err:#}");
    }
    if let Err(err) = store.clear_profile() {
        warn!("Failed to clear stored profile: {err:#}");
    }
}

/// Stores the token together with a resolved profile. Failures are logged
/// and discarded.
pub fn persist_session<S: SessionStore>(store: &S, token: &str, profile: &CanonicalProfile) {
    if let Err(err) = store.write_token(token) {
        warn!("Failed to store token: {err:#}");
    }
    if let Err(err) = store.write_profile(profile) {
        warn!("Failed to store profile: {err:#}");
    }
}

/// File-backed session store. The token is kept as a raw string, the
/// profile as serialized JSON, both under the configured data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn read_token(&self) -> Result<Option<String>> {
        let data = match read_file_lock(&self.token_path())? {
            Some(data) => data,
            None => return Ok(None),
        };
        let token = String::from_utf8(data).context("decode stored token into utf-8")?;
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token))
    }

    pub fn read_profile(&self) -> Result<Option<CanonicalProfile>> {
        let data = match read_file_lock(&self.profile_path())? {
            Some(data) => data,
            None => return Ok(None),
        };
        match serde_json::from_slice(&data) {
            Ok(profile) => Ok(Some(profile)),
            Err(_) => {
                warn!("Stored profile has invalid data, we will ignore it");
                Ok(None)
            }
        }
    }

    fn token_path(&self) -> String {
        format!("{}", self.dir.join(TOKEN_FILE).display())
    }

    fn profile_path(&self) -> String {
        format!("{}", self.dir.join(PROFILE_FILE).display())
    }
}

impl SessionStore for FileStore {
    fn write_token(&self, token: &str) -> Result<()> {
        write_file_lock(&self.token_path(), token.as_bytes()).context("write token file")
    }

    fn write_profile(&self, profile: &CanonicalProfile) -> Result<()> {
        let data = serde_json::to_vec(profile).context("encode profile")?;
        write_file_lock(&self.profile_path(), &data).context("write profile file")
    }

    fn clear_profile(&self) -> Result<()> {
        match fs::remove_file(self.profile_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("remove profile file"),
        }
    }
}

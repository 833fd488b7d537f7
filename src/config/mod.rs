use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::dirs::ensure_dir_exists;

mod defaults;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the authentication server.
    #[serde(default = "defaults::server")]
    pub server: String,

    /// Path of the login endpoint, relative to `server`.
    #[serde(default = "defaults::login_path")]
    pub login_path: String,

    /// Candidate profile endpoints, tried strictly in order.
    #[serde(default = "defaults::profile_paths")]
    pub profile_paths: Vec<String>,

    /// Base URL of the application receiving the handoff.
    #[serde(default = "defaults::redirect_url")]
    pub redirect_url: String,

    /// Origin URL reported to the receiving application. Empty means
    /// "same as server".
    #[serde(default = "defaults::empty_string")]
    pub browser_url: String,

    /// Directory holding the cached session files.
    #[serde(default = "defaults::data_dir")]
    pub data_dir: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut cfg = Self::_load(path)?;
        cfg.validate().context("validate config")?;
        Ok(cfg)
    }

    fn _load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(path) => PathBuf::from(path.as_ref()),
            None => Self::home_dir()?.join(".config").join("handoff.toml"),
        };

        match fs::read_to_string(&path) {
            Ok(toml_str) => {
                let cfg: Config = toml::from_str(&toml_str)
                    .with_context(|| format!("parse config file '{}' toml", path.display()))?;
                Ok(cfg)
            }

            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),

            Err(err) => Err(err).with_context(|| format!("read config file '{}'", path.display())),
        }
    }

    pub fn default() -> Self {
        Self {
            server: defaults::server(),
            login_path: defaults::login_path(),
            profile_paths: defaults::profile_paths(),
            redirect_url: defaults::redirect_url(),
            browser_url: defaults::empty_string(),
            data_dir: defaults::data_dir(),
        }
    }

    /// The value sent as the `browser_url` query parameter.
    pub fn get_browser_url(&self) -> &str {
        if self.browser_url.is_empty() {
            &self.server
        } else {
            &self.browser_url
        }
    }

    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn parse_redirect_url(&self) -> Result<Url> {
        Url::parse(&self.redirect_url)
            .with_context(|| format!("parse redirect url '{}'", self.redirect_url))
    }

    fn validate(&mut self) -> Result<()> {
        self.server = expandenv("server", &self.server)?;
        if self.server.is_empty() {
            bail!("config server cannot be empty");
        }

        if self.login_path.is_empty() {
            bail!("config login_path cannot be empty");
        }

        if self.profile_paths.iter().any(|p| p.is_empty()) {
            bail!("config profile_paths cannot contain empty entries");
        }

        self.redirect_url = expandenv("redirect_url", &self.redirect_url)?;
        self.parse_redirect_url()?;

        self.data_dir = expandenv("data_dir", &self.data_dir)?;
        if self.data_dir.is_empty() {
            bail!("config data_dir cannot be empty");
        }
        ensure_dir_exists(&self.get_data_dir()).context("ensure data_dir")?;

        Ok(())
    }

    fn home_dir() -> Result<PathBuf> {
        let dir = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from);
        match dir {
            Some(dir) => Ok(dir),
            None => {
                bail!("could not determine home directory, please specify config path manually")
            }
        }
    }
}

/// See: [`shellexpand::full`].
fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

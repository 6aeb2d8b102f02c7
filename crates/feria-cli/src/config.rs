// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "feria";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "https://agsrebuild.store/public";
const DEFAULT_TOKEN_ENV: &str = "FERIA_TOKEN";
const DEFAULT_TIMEOUT: &str = "10s";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            backend: Backend::default(),
            session: Session::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Backend {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub token_env: Option<String>,
    pub user_type: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub page_size: Option<usize>,
    pub restricted_user_types: Option<Vec<i64>>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FERIA_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FERIA_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [backend], [session], and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(base_url) = &self.backend.base_url
            && base_url.trim().is_empty()
        {
            bail!("backend.base_url in {} must not be empty", path.display());
        }

        if let Some(timeout) = &self.backend.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "backend.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(page_size) = self.ui.page_size
            && page_size == 0
        {
            bail!("ui.page_size in {} must be positive", path.display());
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.backend
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.backend.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    /// Session token: explicit config value first, then the configured env
    /// var. The panel shell that hosts this tool owns token issuance.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.session.token
            && !token.trim().is_empty()
        {
            return Ok(token.clone());
        }

        let env_name = self.token_env_name();
        match env::var(&env_name) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => bail!(
                "no session token found; set [session].token or export {env_name}"
            ),
        }
    }

    pub fn token_env_name(&self) -> String {
        self.session
            .token_env
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_owned())
    }

    pub fn user_type(&self) -> i64 {
        self.session.user_type.unwrap_or(0)
    }

    pub fn page_size(&self) -> usize {
        self.ui.page_size.unwrap_or(feria_app::DEFAULT_PAGE_SIZE)
    }

    pub fn restricted_user_types(&self) -> Vec<i64> {
        self.ui
            .restricted_user_types
            .clone()
            .unwrap_or_else(|| feria_app::DEFAULT_RESTRICTED_USER_TYPES.to_vec())
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# feria config\n# Place this file at: {}\n\nversion = 1\n\n[backend]\nbase_url = \"{}\"\ntimeout = \"{}\"\n\n[session]\n# token = \"<bearer token>\"\n# Or leave unset and export the env var below\ntoken_env = \"{}\"\nuser_type = 0\n\n[ui]\npage_size = {}\nrestricted_user_types = [1, 2, 4]\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_TOKEN_ENV,
            feria_app::DEFAULT_PAGE_SIZE,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}

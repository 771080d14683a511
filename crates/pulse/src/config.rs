use anyhow::{anyhow, Context, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration merged from config files, environment and flags
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// GitHub access token
    pub token: Option<String>,
    /// OAuth App client id used by `pulse login`
    pub client_id: Option<String>,
    /// Redirect URI registered on the OAuth App
    pub redirect_uri: Option<String>,
    /// Base URL of the OAuth token-exchange proxy
    pub proxy_url: Option<String>,
    /// GitHub API base URL (override for testing)
    pub api_url: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("PULSE_"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli_token: Option<String>) {
        if let Some(token) = cli_token {
            self.token = Some(token);
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or("https://api.github.com")
    }

    pub fn proxy_url(&self) -> &str {
        self.proxy_url.as_deref().unwrap_or("http://localhost:3000")
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri
            .as_deref()
            .unwrap_or("http://localhost:3000/callback")
    }

    /// Persist a freshly obtained token into the user config file, keeping
    /// any other keys already in it
    pub fn save_token(token: &str) -> Result<PathBuf> {
        let path = default_config_path()?;

        let mut doc: toml::Table = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            toml::Table::new()
        };

        doc.insert("token".to_string(), toml::Value::String(token.to_string()));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(&doc)?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Remove the stored token from the user config file
    pub fn clear_token() -> Result<Option<PathBuf>> {
        let path = default_config_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut doc: toml::Table =
            toml::from_str(&content).context("Failed to parse config file")?;

        if doc.remove("token").is_none() {
            return Ok(None);
        }

        fs::write(&path, toml::to_string_pretty(&doc)?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(Some(path))
    }
}

/// Where login state and history live
pub fn default_config_path() -> Result<PathBuf> {
    get_project_config_path().ok_or_else(|| anyhow!("Could not determine config directory"))
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pulse").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("pulse").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("pulse")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".pulse.toml"))
}

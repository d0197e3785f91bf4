use anyhow::{Context, Result};

/// Bundled config for mobile and web builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const BASE_URL_VAR: &str = "GOVTERMS_API_BASE_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    /// Reads the query service base URL from the environment.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(BASE_URL_VAR)
            .with_context(|| format!("{BASE_URL_VAR} is not set"))?;
        Self::new(&raw)
    }

    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            anyhow::bail!("{BASE_URL_VAR} is empty");
        }
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // .env file for desktop dev
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

/// `KEY=VALUE` pairs, skipping blanks and `#` comments.
fn parse_env_lines(source: &str) -> Vec<(&str, &str)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: called from main before the runtime spawns any threads
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

const CONFIG_ENV: &str = "LUNCHLY_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub db: DbConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,
}

fn default_pool_size() -> u32 {
    5
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let config = fs::read_to_string(filename.as_ref()).map_err(|_| Error::ConfigReadError)?;
        serde_yaml::from_str(&config).map_err(|_| Error::ConfigParseError)
    }

    /// Find the config file: `LUNCHLY_CONFIG` first, then `./lunchly.yml`,
    /// `~/.config/lunchly.yml` and `/etc/lunchly.yml`.
    pub fn locate() -> Result<String, Error> {
        let candidates = [
            "./lunchly.yml".to_string(),
            shellexpand::tilde("~/.config/lunchly.yml").into_owned(),
            "/etc/lunchly.yml".to_string(),
        ];
        find_config(std::env::var(CONFIG_ENV).ok(), &candidates)
    }
}

fn find_config(from_env: Option<String>, candidates: &[String]) -> Result<String, Error> {
    if let Some(filename) = from_env {
        return Ok(filename);
    }
    let found = candidates
        .iter()
        .find(|p| Path::new(p.as_str()).exists())
        .cloned();
    found.ok_or(Error::ConfigReadError)
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url(), self.dbname)
    }

    pub fn server_url(&self) -> String {
        if self.password.is_empty() {
            format!("postgres://{}@{}:{}", self.user, self.host, self.port)
        } else {
            format!(
                "postgres://{}:{}@{}:{}",
                self.user, self.password, self.host, self.port
            )
        }
    }
}

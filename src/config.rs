use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use anyhow::{Context, Result};
use dotenvy::dotenv;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            upload_dir: PathBuf::from("uploads"),
            static_dir: PathBuf::from("public"),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Builds a config from a variable lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host: IpAddr = match lookup("HOST") {
            Some(v) => v.parse::<IpAddr>().with_context(|| format!("Invalid HOST: {}", v))?,
            None => defaults.host,
        };
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("Invalid PORT: {}", v))?,
            None => defaults.port,
        };
        let max_file_size: usize = match lookup("MAX_FILE_SIZE") {
            Some(v) => v.parse::<usize>().with_context(|| format!("Invalid MAX_FILE_SIZE: {}", v))?,
            None => defaults.max_file_size,
        };

        Ok(Config {
            host,
            port,
            upload_dir: lookup("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            max_file_size,
        })
    }
}

pub fn load_config() -> Result<Config> {
    // Load .env file first
    dotenv().ok();

    let config = Config::from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!(
        "Loaded config: addr={}, upload_dir={}, static_dir={}, max_file_size={}",
        config.socket_addr(),
        config.upload_dir.display(),
        config.static_dir.display(),
        config.max_file_size
    );
    Ok(config)
}

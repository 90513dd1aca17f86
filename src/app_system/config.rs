use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::domain::{ProductCreate, UserCreate};

pub const ADDR_VAR: &str = "STOREFRONT_ADDR";
pub const CHANNEL_BUFFER_VAR: &str = "STOREFRONT_CHANNEL_BUFFER";
pub const SEED_VAR: &str = "STOREFRONT_SEED";

pub const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Runtime settings for the storefront binary.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub bind_addr: SocketAddr,
    /// Mailbox capacity of every resource actor.
    pub channel_buffer: usize,
    /// YAML catalog loaded at boot, if any.
    pub seed_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_ADDR),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            seed_path: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset or blank
    /// variables fall back to defaults; malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(addr) = var(ADDR_VAR) {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("{ADDR_VAR} is not a socket address: {addr}"))?;
        }

        if let Some(buffer) = var(CHANNEL_BUFFER_VAR) {
            config.channel_buffer = buffer
                .parse()
                .with_context(|| format!("{CHANNEL_BUFFER_VAR} is not an integer: {buffer}"))?;
            if config.channel_buffer == 0 {
                bail!("{CHANNEL_BUFFER_VAR} must be greater than zero");
            }
        }

        config.seed_path = var(SEED_VAR).map(PathBuf::from);
        Ok(config)
    }
}

/// Users and products created when the system boots.
///
/// ```yaml
/// users:
///   - { name: Alice, email: alice@example.com }
///   - { name: Root, email: root@example.com, role: admin }
/// products:
///   - { name: Widget, price: 10.0, stock: 5 }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub users: Vec<UserCreate>,
    #[serde(default)]
    pub products: Vec<ProductCreate>,
}

impl SeedCatalog {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed catalog {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing seed catalog {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

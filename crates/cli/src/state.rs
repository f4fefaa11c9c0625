use std::collections::BTreeMap;
use std::{fs, path::PathBuf, sync::Arc};

use common::prelude::*;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "jax-resolve";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const BLOCKS_DIR_NAME: &str = "blocks";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whether ipns paths may be resolved at all
    #[serde(default = "default_namesys")]
    pub namesys: bool,
    /// Upper bound on a single resolution, in seconds
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,
    /// Published names: key -> path
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

fn default_namesys() -> bool {
    true
}

fn default_resolve_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namesys: default_namesys(),
            resolve_timeout_secs: default_resolve_timeout_secs(),
            names: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the state directory (~/.jax-resolve)
    pub state_dir: PathBuf,
    /// Path to the block directory
    pub blocks_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the state directory path (custom or default ~/.jax-resolve)
    pub fn state_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if state_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&state_dir)?;

        let blocks_path = state_dir.join(BLOCKS_DIR_NAME);
        fs::create_dir_all(&blocks_path)?;

        let state = Self {
            config_path: state_dir.join(CONFIG_FILE_NAME),
            state_dir,
            blocks_path,
            config: config.unwrap_or_default(),
        };
        state.save_config()?;

        Ok(state)
    }

    /// Load existing state from the state directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if !state_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let blocks_path = state_dir.join(BLOCKS_DIR_NAME);
        let config_path = state_dir.join(CONFIG_FILE_NAME);

        if !blocks_path.exists() {
            return Err(StateError::MissingFile(format!("{}/", BLOCKS_DIR_NAME)));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            state_dir,
            blocks_path,
            config_path,
            config,
        })
    }

    /// Write the current configuration back to disk
    pub fn save_config(&self) -> Result<(), StateError> {
        let config_toml = toml::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_toml)?;
        Ok(())
    }

    pub async fn blocks(&self) -> Result<FsBlockStore, StateError> {
        Ok(FsBlockStore::open(&self.blocks_path).await?)
    }

    /// Build the in-memory name table from the configured names.
    /// Returns `None` when the naming layer is switched off.
    pub fn namesys(&self) -> Result<Option<MemoryNameSystem>, StateError> {
        if !self.config.namesys {
            return Ok(None);
        }

        let namesys = MemoryNameSystem::new();
        for (key, value) in &self.config.names {
            let path = Path::parse(value).map_err(|source| StateError::InvalidName {
                key: key.clone(),
                source,
            })?;
            namesys.publish(key, path)?;
        }
        Ok(Some(namesys))
    }

    /// Everything needed to resolve paths against this state directory
    pub async fn host(&self) -> Result<Host, StateError> {
        let resolver = Arc::new(DagResolver::new(self.blocks().await?));
        let namesys = self
            .namesys()?
            .map(|ns| Arc::new(ns) as Arc<dyn NameSystem>);

        tracing::debug!(
            "host: blocks at {}, namesys {}",
            self.blocks_path.display(),
            if namesys.is_some() { "on" } else { "off" }
        );
        Ok(Host::new(namesys, resolver))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state directory not initialized. Run 'jax-resolve init' first")]
    NotInitialized,

    #[error("state directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid path for name {key:?}: {source}")]
    InvalidName {
        key: String,
        #[source]
        source: PathError,
    },

    #[error("name system error: {0}")]
    Namesys(#[from] NamesysError),

    #[error("block store error: {0}")]
    BlockStore(#[from] BlockStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

//! Runtime configuration for where assets are read from.

use std::path::PathBuf;

/// Environment variable that overrides [`AssetConfig::asset_root`].
pub const ASSET_ROOT_ENV: &str = "FLOW_ASSET_ROOT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory every relative asset url is resolved against on native targets.
    pub asset_root: PathBuf,
}

impl AssetConfig {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    /// Defaults, with the asset root taken from `FLOW_ASSET_ROOT` when it is set.
    pub fn from_env() -> Self {
        match std::env::var_os(ASSET_ROOT_ENV) {
            Some(root) if !root.is_empty() => {
                log::debug!("asset root taken from {ASSET_ROOT_ENV}: {root:?}");
                Self::new(root)
            }
            _ => Self::default(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./").join("assets"))
    }
}

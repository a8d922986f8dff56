//! Sources of raw asset bytes.
//!
//! Loaders do not care where bytes come from: natively they are read from the
//! asset directory, in the browser they are fetched relative to the page, and
//! tests serve them from memory.

use std::{collections::HashMap, io};

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use futures::FutureExt;

use crate::error::AssetError;

#[cfg(not(target_arch = "wasm32"))]
pub type ReadFuture<'a> = futures::future::BoxFuture<'a, Result<Vec<u8>, AssetError>>;
#[cfg(target_arch = "wasm32")]
pub type ReadFuture<'a> = futures::future::LocalBoxFuture<'a, Result<Vec<u8>, AssetError>>;

pub trait AssetReader: Send + Sync {
    fn read<'a>(&'a self, url: &'a str) -> ReadFuture<'a>;
}

#[cfg(not(target_arch = "wasm32"))]
fn boxed<'a>(
    future: impl std::future::Future<Output = Result<Vec<u8>, AssetError>> + Send + 'a,
) -> ReadFuture<'a> {
    future.boxed()
}

#[cfg(target_arch = "wasm32")]
fn boxed<'a>(future: impl std::future::Future<Output = Result<Vec<u8>, AssetError>> + 'a) -> ReadFuture<'a> {
    future.boxed_local()
}

/// Reads assets from a directory on disk.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FsReader {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &crate::config::AssetConfig) -> Self {
        Self::new(config.asset_root.clone())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetReader for FsReader {
    fn read<'a>(&'a self, url: &'a str) -> ReadFuture<'a> {
        boxed(async move {
            let path = self.root.join(url.trim_start_matches('/'));
            tokio::fs::read(&path).await.map_err(|source| AssetError::Io {
                url: url.to_string(),
                source,
            })
        })
    }
}

/// Serves assets from memory, keyed by url.
#[derive(Clone, Debug, Default)]
pub struct MemoryReader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        let url = url.into();
        self.files.insert(url.trim_start_matches('/').to_string(), bytes);
    }

    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }
}

impl AssetReader for MemoryReader {
    fn read<'a>(&'a self, url: &'a str) -> ReadFuture<'a> {
        let result = match self.files.get(url.trim_start_matches('/')) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(AssetError::Io {
                url: url.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such asset in memory"),
            }),
        };
        boxed(futures::future::ready(result))
    }
}

/// Fetches assets over HTTP relative to `<page origin>/assets/`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct HttpReader {
    base: reqwest::Url,
}

#[cfg(target_arch = "wasm32")]
impl HttpReader {
    pub fn new(base: reqwest::Url) -> Self {
        Self { base }
    }

    pub fn from_origin() -> anyhow::Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
        let origin = window
            .location()
            .origin()
            .map_err(|_| anyhow::anyhow!("page has no origin"))?;
        let base = reqwest::Url::parse(&format!("{origin}/assets/"))?;
        Ok(Self::new(base))
    }
}

#[cfg(target_arch = "wasm32")]
impl AssetReader for HttpReader {
    fn read<'a>(&'a self, url: &'a str) -> ReadFuture<'a> {
        let io_error = move |e: reqwest::Error| AssetError::Io {
            url: url.to_string(),
            source: io::Error::other(e),
        };
        boxed(async move {
            let target = self
                .base
                .join(url.trim_start_matches('/'))
                .map_err(|e| AssetError::Io {
                    url: url.to_string(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, e),
                })?;
            let response = reqwest::get(target).await.map_err(io_error)?;
            let response = response.error_for_status().map_err(io_error)?;
            let bytes = response.bytes().await.map_err(io_error)?;
            Ok(bytes.to_vec())
        })
    }
}

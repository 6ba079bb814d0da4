//! Off-request aspect detection for gallery images.
//!
//! Results are cached by URL. Each load runs in its own task under a child of
//! the caller's liveness token; cancelling the parent (section dropped) or the
//! child (URL invalidated) stops the task from writing into the cache.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use bytes::Bytes;
use image::ImageReader;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::media::aspect::{classify_dimensions, AspectBucket};
use crate::media::MediaError;

#[derive(Clone)]
pub struct AspectResolver {
    inner: Arc<Inner>,
}

struct Inner {
    cache: RwLock<HashMap<String, AspectBucket>>,
    pending: Mutex<HashMap<String, CancellationToken>>,
    client: Client,
    public_dir: PathBuf,
}

impl AspectResolver {
    pub fn new(public_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, MediaError> {
        Ok(Self {
            inner: Arc::new(Inner {
                cache: RwLock::new(HashMap::new()),
                pending: Mutex::new(HashMap::new()),
                client: Client::builder().timeout(timeout).build()?,
                public_dir: public_dir.into(),
            }),
        })
    }

    pub fn get(&self, url: &str) -> Option<AspectBucket> {
        let cache = self.inner.cache.read().unwrap_or_else(|e| e.into_inner());
        cache.get(url).copied()
    }

    /// Layout class for `url`, or the default class while unknown.
    pub fn layout_class(&self, url: &str) -> &'static str {
        self.get(url).unwrap_or_default().layout_class()
    }

    /// Drops the cached bucket for `url` and cancels any load still in flight.
    pub fn invalidate(&self, url: &str) {
        self.inner
            .cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
        let pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
        if let Some(token) = pending {
            token.cancel();
        }
    }

    /// Starts a load for every URL that is neither cached nor already loading.
    ///
    /// Returns the spawned handles; callers on the request path drop them.
    pub fn refresh<'a>(
        &self,
        urls: impl IntoIterator<Item = &'a str>,
        liveness: &CancellationToken,
    ) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        for url in urls {
            if url.is_empty() || self.get(url).is_some() {
                continue;
            }
            let token = {
                let mut pending = self.inner.pending.lock().unwrap_or_else(|e| e.into_inner());
                if pending.contains_key(url) {
                    continue;
                }
                let token = liveness.child_token();
                pending.insert(url.to_string(), token.clone());
                token
            };

            let resolver = self.clone();
            let url = url.to_string();
            handles.push(tokio::spawn(async move {
                resolver.resolve(&url, &token).await;
                if !token.is_cancelled() {
                    resolver
                        .inner
                        .pending
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .remove(&url);
                }
            }));
        }
        handles
    }

    /// Loads, measures and caches one image. Failures are logged and leave no
    /// entry; a cancelled token discards the result.
    pub async fn resolve(&self, url: &str, token: &CancellationToken) -> Option<AspectBucket> {
        let loaded = tokio::select! {
            _ = token.cancelled() => {
                debug!("Aspect load for {url} cancelled");
                return None;
            }
            loaded = self.load(url) => loaded,
        };

        let bucket = match loaded.and_then(|bytes| read_dimensions(&bytes)) {
            Ok((width, height)) => classify_dimensions(width, height)?,
            Err(e) => {
                warn!("Could not measure {url}: {e}");
                return None;
            }
        };

        if token.is_cancelled() {
            debug!("Discarding aspect for {url}: owner gone");
            return None;
        }

        self.inner
            .cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), bucket);
        debug!("Aspect for {url}: {bucket:?}");
        Some(bucket)
    }

    async fn load(&self, url: &str) -> Result<Bytes, MediaError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            let response = self.inner.client.get(url).send().await?.error_for_status()?;
            return Ok(response.bytes().await?);
        }
        let path = site_path(&self.inner.public_dir, url)?;
        Ok(Bytes::from(tokio::fs::read(path).await?))
    }
}

/// Maps a site-absolute path like `/uploads/a.png` into the public dir.
fn site_path(public_dir: &Path, url: &str) -> Result<PathBuf, MediaError> {
    let relative = url
        .strip_prefix('/')
        .ok_or_else(|| MediaError::InvalidPath(url.to_string()))?;
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(MediaError::InvalidPath(url.to_string()));
    }
    Ok(public_dir.join(relative))
}

/// Reads only as much of the header as the format needs to report its size.
fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), MediaError> {
    Ok(ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?)
}

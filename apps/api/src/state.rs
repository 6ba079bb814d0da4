use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::media::{AspectResolver, HttpMediaStore, LocalMediaStore, MediaStore};
use crate::sections::{AboutSection, EditContext, ProjectsSection};
use crate::store::{ContentStore, FileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContentStore>,
    /// Local disk or a remote site, chosen by `MEDIA_BACKEND_URL`.
    pub media: Arc<dyn MediaStore>,
    edit: Arc<RwLock<EditContext>>,
    /// Each mounted section serializes its own edits.
    pub about: Arc<Mutex<AboutSection>>,
    pub projects: Arc<Mutex<ProjectsSection>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ContentStore>,
        media: Arc<dyn MediaStore>,
        about: AboutSection,
        projects: ProjectsSection,
    ) -> Self {
        Self {
            config,
            store,
            media,
            edit: Arc::new(RwLock::new(EditContext::VIEWING)),
            about: Arc::new(Mutex::new(about)),
            projects: Arc::new(Mutex::new(projects)),
        }
    }

    /// Opens the store, picks the media backend and mounts both sections.
    pub async fn from_config(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.media_timeout_secs);
        let store: Arc<dyn ContentStore> = Arc::new(FileStore::open(&config.content_dir)?);

        let media: Arc<dyn MediaStore> = match &config.media_backend_url {
            Some(url) => {
                info!("Media backend: remote ({url})");
                Arc::new(
                    HttpMediaStore::new(url.clone(), timeout)
                        .context("Failed to build media backend client")?,
                )
            }
            None => {
                info!("Media backend: local ({})", config.public_dir.display());
                Arc::new(LocalMediaStore::new(&config.public_dir))
            }
        };

        let resolver = AspectResolver::new(&config.public_dir, timeout)
            .context("Failed to build aspect resolver client")?;
        let about = AboutSection::mount(store.clone()).await;
        let projects = ProjectsSection::mount(store.clone(), media.clone(), resolver).await;
        info!("Sections mounted");

        Ok(Self::new(config, store, media, about, projects))
    }

    pub fn edit_context(&self) -> EditContext {
        *self.edit.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns whether the mode changed.
    pub fn set_edit_mode(&self, enabled: bool) -> bool {
        let mut ctx = self.edit.write().unwrap_or_else(|e| e.into_inner());
        let changed = ctx.edit_mode != enabled;
        *ctx = EditContext::new(enabled);
        changed
    }
}

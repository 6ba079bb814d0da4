//! The Projects gallery.
//!
//! Unlike About, every Projects mutation writes the snapshot file as well as
//! the local key, and answers with a notice describing that file write.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::content::list::{self, ListError};
use crate::content::merge::overlay;
use crate::content::models::{
    Background, BackgroundPatch, Project, ProjectField, ProjectsContent, ProjectsEdit,
};
use crate::content::validation::ProjectDraft;
use crate::errors::AppError;
use crate::media::{is_uploaded_path, AspectResolver, MediaStore};
use crate::sections::disclosure::DisplayWindow;
use crate::sections::{load_defaults, persist_local, EditContext, EditGrant, Notice};
use crate::store::{ContentStore, StoreError};

const SECTION: &str = "projects";
const FILE_SUFFIX: &str = "Info";
const INFO_KEY: &str = "projects-info";
const BACKGROUND_KEY: &str = "projects-background";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub index: usize,
    #[serde(flatten)]
    pub project: Project,
    /// Video when set, otherwise the image.
    pub visual: String,
    pub visual_is_video: bool,
    pub layout_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsView {
    pub edit_mode: bool,
    pub title: String,
    pub subtitle: String,
    pub initial_display: usize,
    pub load_more_count: usize,
    pub background: Background,
    pub projects: Vec<ProjectCard>,
    pub total: usize,
    pub has_more: bool,
    pub remaining: usize,
    pub show_empty_state: bool,
}

pub struct ProjectsSection {
    store: Arc<dyn ContentStore>,
    media: Arc<dyn MediaStore>,
    resolver: AspectResolver,
    liveness: CancellationToken,
    defaults: ProjectsContent,
    content: ProjectsContent,
    window: DisplayWindow,
}

impl Drop for ProjectsSection {
    fn drop(&mut self) {
        self.liveness.cancel();
    }
}

impl ProjectsSection {
    pub async fn mount(
        store: Arc<dyn ContentStore>,
        media: Arc<dyn MediaStore>,
        resolver: AspectResolver,
    ) -> Self {
        let defaults: ProjectsContent = load_defaults(store.as_ref(), SECTION, FILE_SUFFIX).await;
        let mut section = Self {
            store,
            media,
            resolver,
            liveness: CancellationToken::new(),
            window: DisplayWindow::new(defaults.initial_display),
            content: defaults.clone(),
            defaults,
        };
        section.reload();
        section
    }

    /// Re-reads the persisted overlay and resets the disclosure window.
    pub fn reload(&mut self) {
        if let Some(saved) = self.store.get_data(INFO_KEY) {
            self.content = overlay(&self.defaults, &saved);
        }
        if let Some(saved) = self.store.get_data(BACKGROUND_KEY) {
            self.content.background = overlay(&self.content.background, &saved);
        }
        self.window.reset(self.content.initial_display);
        self.refresh_aspects();
        debug!(
            "Projects section reloaded with {} projects",
            self.content.projects.len()
        );
    }

    pub fn content(&self) -> &ProjectsContent {
        &self.content
    }

    pub fn view(&self, ctx: EditContext) -> ProjectsView {
        let c = &self.content;
        let total = c.projects.len();
        let projects = c
            .projects
            .iter()
            .take(self.window.visible_len(total, ctx))
            .enumerate()
            .map(|(index, project)| {
                let visual_is_video = !project.video.is_empty();
                let (visual, layout_class) = if visual_is_video {
                    (project.video.clone(), "aspect-video")
                } else {
                    (project.image.clone(), self.resolver.layout_class(&project.image))
                };
                ProjectCard {
                    index,
                    project: project.clone(),
                    visual,
                    visual_is_video,
                    layout_class,
                }
            })
            .collect();

        ProjectsView {
            edit_mode: ctx.is_editing(),
            title: c.title.clone(),
            subtitle: c.subtitle.clone(),
            initial_display: c.initial_display,
            load_more_count: c.load_more_count,
            background: c.background.clone(),
            projects,
            total,
            has_more: self.window.has_more(total, ctx),
            remaining: self.window.remaining(total),
            show_empty_state: total == 0 && !ctx.is_editing(),
        }
    }

    /// Visitor action; needs no grant.
    pub fn load_more(&mut self) {
        let total = self.content.projects.len();
        self.window.load_more(self.content.load_more_count, total);
    }

    pub async fn edit(&mut self, _grant: EditGrant, edit: ProjectsEdit) -> Notice {
        let mut next = self.content.clone();
        edit.apply(&mut next);
        self.commit(next);
        self.save_file("Projects saved to file").await
    }

    pub async fn update_project(
        &mut self,
        _grant: EditGrant,
        index: usize,
        field: ProjectField,
        value: String,
    ) -> Result<Notice, ListError> {
        let mut next = self.content.clone();
        let previous_image = next.projects.get(index).map(|p| p.image.clone());
        list::update(&mut next.projects, index, field, value)?;

        if let Some(old) = previous_image {
            if next.projects[index].image != old {
                self.resolver.invalidate(&old);
            }
        }
        self.commit(next);
        self.refresh_aspects();
        Ok(self.save_file("Projects saved to file").await)
    }

    pub async fn add_project(&mut self, _grant: EditGrant, draft: ProjectDraft) -> Result<Notice, AppError> {
        let project = draft.into_project()?;
        let mut next = self.content.clone();
        list::add(&mut next.projects, project);
        self.commit(next);
        self.refresh_aspects();
        info!("Project added ({} total)", self.content.projects.len());
        Ok(self.save_file("Project added and saved to file").await)
    }

    /// Deletes the project's uploaded files one at a time, then removes the
    /// record whether or not those deletes succeeded.
    pub async fn remove_project(&mut self, _grant: EditGrant, index: usize) -> Result<Notice, ListError> {
        let len = self.content.projects.len();
        let target = self
            .content
            .projects
            .get(index)
            .cloned()
            .ok_or(ListError::OutOfRange { index, len })?;

        for path in target.media_refs().into_iter().filter(|p| is_uploaded_path(p)) {
            match self.media.delete(path).await {
                Ok(()) => info!("Deleted project file {path}"),
                Err(e) => warn!("Could not delete project file {path}: {e}"),
            }
        }

        let mut next = self.content.clone();
        list::remove(&mut next.projects, index)?;
        self.resolver.invalidate(&target.image);
        self.commit(next);
        self.refresh_aspects();
        Ok(self.save_file("Projects saved to file").await)
    }

    /// Drops an abandoned draft's uploaded image. Nothing is persisted.
    pub async fn discard_draft(&self, _grant: EditGrant, draft: &ProjectDraft) {
        if !is_uploaded_path(&draft.image) {
            return;
        }
        if let Err(e) = self.media.delete(&draft.image).await {
            warn!("Could not delete draft upload {}: {e}", draft.image);
        }
    }

    /// Background edits stay local: no snapshot file is written.
    pub fn update_background(&mut self, _grant: EditGrant, patch: BackgroundPatch) -> Result<(), AppError> {
        let background = self.content.background.patched(patch);
        if !(0.0..=1.0).contains(&background.opacity) {
            return Err(AppError::Validation(
                "Background opacity must be between 0 and 1".to_string(),
            ));
        }
        persist_local(self.store.as_ref(), BACKGROUND_KEY, &background);
        let mut next = self.content.clone();
        next.background = background;
        self.commit(next);
        Ok(())
    }

    fn commit(&mut self, next: ProjectsContent) {
        self.content = next;
        persist_local(self.store.as_ref(), INFO_KEY, &self.content);
    }

    async fn save_file(&self, success: &str) -> Notice {
        let result = match serde_json::to_value(&self.content) {
            Ok(json) => self.store.save_to_file(SECTION, FILE_SUFFIX, &json).await,
            Err(e) => Err(StoreError::from(e)),
        };
        Notice::from_file_save(result, success)
    }

    fn refresh_aspects(&self) {
        let urls = self.content.projects.iter().map(|p| p.image.as_str());
        // Loads finish in the background; the next view picks them up.
        drop(self.resolver.refresh(urls, &self.liveness));
    }
}

use serde::Deserialize;

use crate::content::models::Project;
use crate::errors::AppError;
use crate::media::looks_like_video;

/// What the "new project" form collects. The single media slot may hold an
/// image or a video; `into_project` sorts that out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub image: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
}

impl ProjectDraft {
    /// Validates the draft and builds the stored record.
    ///
    /// Title and description are required. A media value with a video
    /// extension is moved to `video` so exactly one visual is active.
    pub fn into_project(self) -> Result<Project, AppError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Please enter a {}",
                missing.join(" and ")
            )));
        }

        let (image, video) = if looks_like_video(&self.image) {
            (String::new(), self.image)
        } else {
            (self.image, String::new())
        };

        Ok(Project {
            image,
            video,
            title: self.title,
            description: self.description,
            file_url: self.file_url,
        })
    }
}

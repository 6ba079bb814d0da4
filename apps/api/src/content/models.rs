use serde::{Deserialize, Serialize};

use crate::content::list::Record;

/// Section-wide visual overlay. Persisted on its own key and mirrored into
/// the section record so a file snapshot carries it too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub image: String,
    pub video: String,
    pub color: String,
    pub opacity: f64,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            image: String::new(),
            video: String::new(),
            color: "#ffffff".to_string(),
            opacity: 0.0,
        }
    }
}

/// Partial background update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackgroundPatch {
    pub image: Option<String>,
    pub video: Option<String>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
}

impl Background {
    pub fn patched(&self, patch: BackgroundPatch) -> Background {
        Background {
            image: patch.image.unwrap_or_else(|| self.image.clone()),
            video: patch.video.unwrap_or_else(|| self.video.clone()),
            color: patch.color.unwrap_or_else(|| self.color.clone()),
            opacity: patch.opacity.unwrap_or(self.opacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceCard {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Icon,
    Title,
    Period,
    Description,
}

impl Record for ExperienceCard {
    type Field = ExperienceField;

    fn set_field(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Icon => self.icon = value,
            ExperienceField::Title => self.title = value,
            ExperienceField::Period => self.period = value,
            ExperienceField::Description => self.description = value,
        }
    }
}

impl ExperienceCard {
    pub fn placeholder() -> Self {
        Self {
            icon: "briefcase".to_string(),
            title: "New experience".to_string(),
            period: "2024".to_string(),
            description: "Enter a description".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillField {
    Icon,
    Title,
    Description,
}

impl Record for Skill {
    type Field = SkillField;

    fn set_field(&mut self, field: SkillField, value: String) {
        match field {
            SkillField::Icon => self.icon = value,
            SkillField::Title => self.title = value,
            SkillField::Description => self.description = value,
        }
    }
}

impl Skill {
    pub fn placeholder() -> Self {
        Self {
            icon: "star".to_string(),
            title: "New skill".to_string(),
            description: "Describe the skill".to_string(),
        }
    }
}

/// A gallery entry. Empty strings mean "not set" for the optional fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Image,
    Video,
    Title,
    Description,
    FileUrl,
}

impl Record for Project {
    type Field = ProjectField;

    fn set_field(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Image => self.image = value,
            ProjectField::Video => self.video = value,
            ProjectField::Title => self.title = value,
            ProjectField::Description => self.description = value,
            ProjectField::FileUrl => self.file_url = value,
        }
    }
}

impl Project {
    /// Every media reference the project carries, set or not.
    pub fn media_refs(&self) -> [&str; 3] {
        [&self.image, &self.video, &self.file_url]
    }
}

/// Plain text entries (story paragraphs, hobbies) have a single, unnamed field.
impl Record for String {
    type Field = ();

    fn set_field(&mut self, _field: (), value: String) {
        *self = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub background: Background,
    pub experience_cards: Vec<ExperienceCard>,
    pub skills: Vec<Skill>,
    pub story_title: String,
    pub story: Vec<String>,
    pub story_image: String,
    pub hobbies: Vec<String>,
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            title: "About".to_string(),
            subtitle: "Introduce your expertise and what drives you.".to_string(),
            background: Background {
                color: "#fff8df".to_string(),
                opacity: 0.4,
                ..Background::default()
            },
            experience_cards: vec![
                ExperienceCard {
                    icon: "graduation".to_string(),
                    title: "University".to_string(),
                    period: "2022 - present".to_string(),
                    description: "Major and minor field of study".to_string(),
                },
                ExperienceCard {
                    icon: "award".to_string(),
                    title: "Certification".to_string(),
                    period: "2024".to_string(),
                    description: "What the certification lets you do independently".to_string(),
                },
            ],
            skills: vec![
                Skill {
                    icon: "code".to_string(),
                    title: "Frontend development".to_string(),
                    description: "Building web applications".to_string(),
                },
                Skill {
                    icon: "database".to_string(),
                    title: "Data analysis".to_string(),
                    description: "Statistics with Python, R and spreadsheets".to_string(),
                },
            ],
            story_title: "My story".to_string(),
            story: vec!["Tell visitors who you are and what you are working towards.".to_string()],
            story_image: String::new(),
            hobbies: vec!["📚 Reading".to_string(), "🎬 Movies".to_string()],
        }
    }
}

/// Scalar About fields editable in place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum AboutEdit {
    Title(String),
    Subtitle(String),
    StoryTitle(String),
    StoryImage(String),
}

impl AboutEdit {
    pub fn apply(self, content: &mut AboutContent) {
        match self {
            AboutEdit::Title(v) => content.title = v,
            AboutEdit::Subtitle(v) => content.subtitle = v,
            AboutEdit::StoryTitle(v) => content.story_title = v,
            AboutEdit::StoryImage(v) => content.story_image = v,
        }
    }
}

pub const DEFAULT_INITIAL_DISPLAY: usize = 6;
pub const DEFAULT_LOAD_MORE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsContent {
    pub title: String,
    pub subtitle: String,
    pub initial_display: usize,
    pub load_more_count: usize,
    pub background: Background,
    pub projects: Vec<Project>,
}

impl Default for ProjectsContent {
    fn default() -> Self {
        Self {
            title: "Projects".to_string(),
            subtitle: "Selected coursework and personal projects".to_string(),
            initial_display: DEFAULT_INITIAL_DISPLAY,
            load_more_count: DEFAULT_LOAD_MORE_COUNT,
            background: Background {
                color: "#c7ad75".to_string(),
                opacity: 0.3,
                ..Background::default()
            },
            projects: vec![
                Project {
                    title: "Housing price drivers".to_string(),
                    description: "Regression analysis of 500 simulated transactions".to_string(),
                    ..Project::default()
                },
                Project {
                    title: "Demand-responsive transit proposal".to_string(),
                    description: "Origin-destination analysis and service design".to_string(),
                    ..Project::default()
                },
            ],
        }
    }
}

/// Scalar Projects fields editable in place, including the display settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProjectsEdit {
    Title(String),
    Subtitle(String),
    InitialDisplay(usize),
    LoadMoreCount(usize),
}

impl ProjectsEdit {
    pub fn apply(self, content: &mut ProjectsContent) {
        match self {
            ProjectsEdit::Title(v) => content.title = v,
            ProjectsEdit::Subtitle(v) => content.subtitle = v,
            ProjectsEdit::InitialDisplay(v) => content.initial_display = v,
            ProjectsEdit::LoadMoreCount(v) => content.load_more_count = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_uses_camel_case_file_url() {
        let p: Project = serde_json::from_value(json!({
            "image": "/uploads/a.png",
            "title": "T",
            "description": "D",
            "fileUrl": "/uploads/a.pdf"
        }))
        .unwrap();
        assert_eq!(p.file_url, "/uploads/a.pdf");
        assert_eq!(p.video, "");
    }

    #[test]
    fn test_set_field_touches_one_field() {
        let mut card = ExperienceCard::placeholder();
        card.set_field(ExperienceField::Period, "2020".to_string());
        assert_eq!(card.period, "2020");
        assert_eq!(card.title, "New experience");
        assert_eq!(card.icon, "briefcase");
    }

    #[test]
    fn test_background_patch_keeps_unset_fields() {
        let bg = Background {
            image: "/uploads/bg.png".to_string(),
            video: String::new(),
            color: "#000000".to_string(),
            opacity: 0.5,
        };
        let patched = bg.patched(BackgroundPatch {
            opacity: Some(0.8),
            ..BackgroundPatch::default()
        });
        assert_eq!(patched.image, "/uploads/bg.png");
        assert_eq!(patched.color, "#000000");
        assert_eq!(patched.opacity, 0.8);
    }

    #[test]
    fn test_scalar_edits_deserialize_from_field_value_pairs() {
        let edit: ProjectsEdit =
            serde_json::from_value(json!({ "field": "initialDisplay", "value": 9 })).unwrap();
        assert_eq!(edit, ProjectsEdit::InitialDisplay(9));

        let edit: AboutEdit =
            serde_json::from_value(json!({ "field": "storyTitle", "value": "Hi" })).unwrap();
        assert_eq!(edit, AboutEdit::StoryTitle("Hi".to_string()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let r = serde_json::from_value::<ProjectField>(json!("thumbnail"));
        assert!(r.is_err());
    }
}

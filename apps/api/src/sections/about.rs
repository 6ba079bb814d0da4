use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::content::icons::{ExperienceIcon, SkillIcon};
use crate::content::list::{self, ListError, Record};
use crate::content::merge::overlay;
use crate::content::models::{
    AboutContent, AboutEdit, Background, BackgroundPatch, ExperienceCard, Skill,
};
use crate::errors::AppError;
use crate::sections::{load_defaults, persist_local, EditContext, EditGrant, Notice};
use crate::store::{ContentStore, StoreError};

const SECTION: &str = "about";
const FILE_SUFFIX: &str = "Info";
const INFO_KEY: &str = "about-info";
const BACKGROUND_KEY: &str = "about-background";

pub const NEW_PARAGRAPH: &str = "New paragraph";
pub const NEW_HOBBY: &str = "🎯 New hobby";

/// List selectors for the generic list operations below.
pub mod lists {
    use crate::content::models::{AboutContent, ExperienceCard, Skill};

    pub fn experience_cards(c: &mut AboutContent) -> &mut Vec<ExperienceCard> {
        &mut c.experience_cards
    }

    pub fn skills(c: &mut AboutContent) -> &mut Vec<Skill> {
        &mut c.skills
    }

    pub fn story(c: &mut AboutContent) -> &mut Vec<String> {
        &mut c.story
    }

    pub fn hobbies(c: &mut AboutContent) -> &mut Vec<String> {
        &mut c.hobbies
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCardView {
    #[serde(flatten)]
    pub card: ExperienceCard,
    pub resolved_icon: ExperienceIcon,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillView {
    #[serde(flatten)]
    pub skill: Skill,
    pub resolved_icon: SkillIcon,
    pub glyph: &'static str,
}

/// What the About block renders for a given context. Empty optional blocks
/// are hidden from visitors but stay visible to the editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView {
    pub edit_mode: bool,
    pub title: String,
    pub subtitle: String,
    pub background: Background,
    pub experience_cards: Vec<ExperienceCardView>,
    pub skills: Vec<SkillView>,
    pub show_skills: bool,
    pub story_title: String,
    pub story: Vec<String>,
    pub story_image: String,
    pub show_story: bool,
    pub hobbies: Vec<String>,
    pub show_hobbies: bool,
}

pub struct AboutSection {
    store: Arc<dyn ContentStore>,
    defaults: AboutContent,
    content: AboutContent,
}

impl AboutSection {
    pub async fn mount(store: Arc<dyn ContentStore>) -> Self {
        let defaults: AboutContent = load_defaults(store.as_ref(), SECTION, FILE_SUFFIX).await;
        let mut section = Self {
            store,
            content: defaults.clone(),
            defaults,
        };
        section.reload();
        section
    }

    /// Re-reads the persisted overlay. With nothing persisted the current
    /// content is kept.
    pub fn reload(&mut self) {
        if let Some(saved) = self.store.get_data(INFO_KEY) {
            self.content = overlay(&self.defaults, &saved);
        }
        if let Some(saved) = self.store.get_data(BACKGROUND_KEY) {
            self.content.background = overlay(&self.content.background, &saved);
        }
        debug!("About section reloaded");
    }

    pub fn content(&self) -> &AboutContent {
        &self.content
    }

    pub fn view(&self, ctx: EditContext) -> AboutView {
        let editing = ctx.is_editing();
        let c = &self.content;
        AboutView {
            edit_mode: editing,
            title: c.title.clone(),
            subtitle: c.subtitle.clone(),
            background: c.background.clone(),
            experience_cards: c
                .experience_cards
                .iter()
                .map(|card| {
                    let icon = ExperienceIcon::resolve(&card.icon);
                    ExperienceCardView {
                        card: card.clone(),
                        resolved_icon: icon,
                        glyph: icon.glyph(),
                    }
                })
                .collect(),
            skills: c
                .skills
                .iter()
                .map(|skill| {
                    let icon = SkillIcon::resolve(&skill.icon);
                    SkillView {
                        skill: skill.clone(),
                        resolved_icon: icon,
                        glyph: icon.glyph(),
                    }
                })
                .collect(),
            show_skills: editing || !c.skills.is_empty(),
            story_title: c.story_title.clone(),
            story: c.story.clone(),
            story_image: c.story_image.clone(),
            show_story: editing || !c.story.is_empty(),
            hobbies: c.hobbies.clone(),
            show_hobbies: editing || !c.hobbies.is_empty(),
        }
    }

    pub fn edit(&mut self, _grant: EditGrant, edit: AboutEdit) {
        let mut next = self.content.clone();
        edit.apply(&mut next);
        self.commit(next);
    }

    pub fn add_item<R, S>(&mut self, _grant: EditGrant, select: S, record: R)
    where
        S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
    {
        let mut next = self.content.clone();
        list::add(select(&mut next), record);
        self.commit(next);
    }

    pub fn update_item<R, S>(
        &mut self,
        _grant: EditGrant,
        select: S,
        index: usize,
        field: R::Field,
        value: String,
    ) -> Result<(), ListError>
    where
        R: Record,
        S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
    {
        let mut next = self.content.clone();
        list::update(select(&mut next), index, field, value)?;
        self.commit(next);
        Ok(())
    }

    pub fn remove_item<R, S>(&mut self, _grant: EditGrant, select: S, index: usize) -> Result<R, ListError>
    where
        S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
    {
        let mut next = self.content.clone();
        let removed = list::remove(select(&mut next), index)?;
        self.commit(next);
        Ok(removed)
    }

    /// Stores the background on its own key, then mirrors it into the record.
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

    /// The only About operation that writes a snapshot file.
    pub async fn save_to_file(&self, _grant: EditGrant) -> Notice {
        let result = match serde_json::to_value(&self.content) {
            Ok(json) => self.store.save_to_file(SECTION, FILE_SUFFIX, &json).await,
            Err(e) => Err(StoreError::from(e)),
        };
        if result.is_ok() {
            info!("About snapshot written");
        }
        Notice::from_file_save(result, "About settings saved to file")
    }

    fn commit(&mut self, next: AboutContent) {
        self.content = next;
        persist_local(self.store.as_ref(), INFO_KEY, &self.content);
    }
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::list::Record;
use crate::content::models::{
    AboutContent, AboutEdit, BackgroundPatch, ExperienceCard, ExperienceField, ProjectField,
    ProjectsEdit, Skill, SkillField,
};
use crate::content::validation::ProjectDraft;
use crate::errors::AppError;
use crate::sections::about::{lists, AboutView, NEW_HOBBY, NEW_PARAGRAPH};
use crate::sections::projects::ProjectsView;
use crate::sections::{EditContext, Notice, SectionResponse};
use crate::state::AppState;

type AboutResponse = Json<SectionResponse<AboutView>>;
type ProjectsResponse = Json<SectionResponse<ProjectsView>>;

#[derive(Debug, Deserialize)]
pub struct EditModeRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditModeResponse {
    pub edit_mode: bool,
    pub reloaded: bool,
}

/// Body for updating one named field of a list record.
#[derive(Debug, Deserialize)]
pub struct FieldUpdate<F> {
    pub field: F,
    pub value: String,
}

/// Body for updating a plain-text list entry.
#[derive(Debug, Deserialize)]
pub struct TextUpdate {
    pub value: String,
}

// ── Edit mode ───────────────────────────────────────────────────────────────

/// GET /api/v1/edit-mode
pub async fn handle_get_edit_mode(State(state): State<AppState>) -> Json<EditContext> {
    Json(state.edit_context())
}

/// PUT /api/v1/edit-mode
/// Reloads every section's persisted overlay when the mode actually changes.
pub async fn handle_put_edit_mode(
    State(state): State<AppState>,
    Json(req): Json<EditModeRequest>,
) -> Json<EditModeResponse> {
    let changed = state.set_edit_mode(req.enabled);
    if changed {
        state.about.lock().await.reload();
        state.projects.lock().await.reload();
        info!("Edit mode {}", if req.enabled { "on" } else { "off" });
    }
    Json(EditModeResponse {
        edit_mode: req.enabled,
        reloaded: changed,
    })
}

// ── About ───────────────────────────────────────────────────────────────────

async fn about_response(state: &AppState, ctx: EditContext, notice: Option<Notice>) -> AboutResponse {
    let view = state.about.lock().await.view(ctx);
    Json(SectionResponse { view, notice })
}

/// GET /api/v1/sections/about
pub async fn handle_get_about(State(state): State<AppState>) -> AboutResponse {
    about_response(&state, state.edit_context(), None).await
}

/// PATCH /api/v1/sections/about
pub async fn handle_patch_about(
    State(state): State<AppState>,
    Json(edit): Json<AboutEdit>,
) -> Result<AboutResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.about.lock().await.edit(grant, edit);
    Ok(about_response(&state, ctx, None).await)
}

/// PUT /api/v1/sections/about/background
pub async fn handle_put_about_background(
    State(state): State<AppState>,
    Json(patch): Json<BackgroundPatch>,
) -> Result<AboutResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.about.lock().await.update_background(grant, patch)?;
    Ok(about_response(&state, ctx, None).await)
}

/// POST /api/v1/sections/about/save
pub async fn handle_save_about(State(state): State<AppState>) -> Result<AboutResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    let notice = state.about.lock().await.save_to_file(grant).await;
    Ok(about_response(&state, ctx, Some(notice)).await)
}

async fn add_about_item<R, S>(state: &AppState, select: S, record: R) -> Result<AboutResponse, AppError>
where
    S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
{
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.about.lock().await.add_item(grant, select, record);
    Ok(about_response(state, ctx, None).await)
}

async fn update_about_item<R, S>(
    state: &AppState,
    select: S,
    index: usize,
    field: R::Field,
    value: String,
) -> Result<AboutResponse, AppError>
where
    R: Record,
    S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
{
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state
        .about
        .lock()
        .await
        .update_item(grant, select, index, field, value)?;
    Ok(about_response(state, ctx, None).await)
}

async fn remove_about_item<R, S>(state: &AppState, select: S, index: usize) -> Result<AboutResponse, AppError>
where
    S: FnOnce(&mut AboutContent) -> &mut Vec<R>,
{
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.about.lock().await.remove_item(grant, select, index)?;
    Ok(about_response(state, ctx, None).await)
}

/// POST /api/v1/sections/about/experience-cards
pub async fn handle_add_experience_card(State(state): State<AppState>) -> Result<AboutResponse, AppError> {
    add_about_item(&state, lists::experience_cards, ExperienceCard::placeholder()).await
}

/// PATCH /api/v1/sections/about/experience-cards/:index
pub async fn handle_update_experience_card(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<FieldUpdate<ExperienceField>>,
) -> Result<AboutResponse, AppError> {
    update_about_item(&state, lists::experience_cards, index, req.field, req.value).await
}

/// DELETE /api/v1/sections/about/experience-cards/:index
pub async fn handle_remove_experience_card(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<AboutResponse, AppError> {
    remove_about_item(&state, lists::experience_cards, index).await
}

/// POST /api/v1/sections/about/skills
pub async fn handle_add_skill(State(state): State<AppState>) -> Result<AboutResponse, AppError> {
    add_about_item(&state, lists::skills, Skill::placeholder()).await
}

/// PATCH /api/v1/sections/about/skills/:index
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<FieldUpdate<SkillField>>,
) -> Result<AboutResponse, AppError> {
    update_about_item(&state, lists::skills, index, req.field, req.value).await
}

/// DELETE /api/v1/sections/about/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<AboutResponse, AppError> {
    remove_about_item(&state, lists::skills, index).await
}

/// POST /api/v1/sections/about/story
pub async fn handle_add_paragraph(State(state): State<AppState>) -> Result<AboutResponse, AppError> {
    add_about_item(&state, lists::story, NEW_PARAGRAPH.to_string()).await
}

/// PATCH /api/v1/sections/about/story/:index
pub async fn handle_update_paragraph(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<TextUpdate>,
) -> Result<AboutResponse, AppError> {
    update_about_item(&state, lists::story, index, (), req.value).await
}

/// DELETE /api/v1/sections/about/story/:index
pub async fn handle_remove_paragraph(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<AboutResponse, AppError> {
    remove_about_item(&state, lists::story, index).await
}

/// POST /api/v1/sections/about/hobbies
pub async fn handle_add_hobby(State(state): State<AppState>) -> Result<AboutResponse, AppError> {
    add_about_item(&state, lists::hobbies, NEW_HOBBY.to_string()).await
}

/// PATCH /api/v1/sections/about/hobbies/:index
pub async fn handle_update_hobby(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<TextUpdate>,
) -> Result<AboutResponse, AppError> {
    update_about_item(&state, lists::hobbies, index, (), req.value).await
}

/// DELETE /api/v1/sections/about/hobbies/:index
pub async fn handle_remove_hobby(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<AboutResponse, AppError> {
    remove_about_item(&state, lists::hobbies, index).await
}

// ── Projects ────────────────────────────────────────────────────────────────

async fn projects_response(
    state: &AppState,
    ctx: EditContext,
    notice: Option<Notice>,
) -> ProjectsResponse {
    let view = state.projects.lock().await.view(ctx);
    Json(SectionResponse { view, notice })
}

/// GET /api/v1/sections/projects
pub async fn handle_get_projects(State(state): State<AppState>) -> ProjectsResponse {
    projects_response(&state, state.edit_context(), None).await
}

/// PATCH /api/v1/sections/projects
pub async fn handle_patch_projects(
    State(state): State<AppState>,
    Json(edit): Json<ProjectsEdit>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    let notice = state.projects.lock().await.edit(grant, edit).await;
    Ok(projects_response(&state, ctx, Some(notice)).await)
}

/// PUT /api/v1/sections/projects/background
pub async fn handle_put_projects_background(
    State(state): State<AppState>,
    Json(patch): Json<BackgroundPatch>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.projects.lock().await.update_background(grant, patch)?;
    Ok(projects_response(&state, ctx, None).await)
}

/// POST /api/v1/sections/projects/items
pub async fn handle_add_project(
    State(state): State<AppState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    let notice = state.projects.lock().await.add_project(grant, draft).await?;
    Ok(projects_response(&state, ctx, Some(notice)).await)
}

/// PATCH /api/v1/sections/projects/items/:index
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<FieldUpdate<ProjectField>>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    let notice = state
        .projects
        .lock()
        .await
        .update_project(grant, index, req.field, req.value)
        .await?;
    Ok(projects_response(&state, ctx, Some(notice)).await)
}

/// DELETE /api/v1/sections/projects/items/:index
pub async fn handle_remove_project(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    let notice = state
        .projects
        .lock()
        .await
        .remove_project(grant, index)
        .await?;
    Ok(projects_response(&state, ctx, Some(notice)).await)
}

/// POST /api/v1/sections/projects/drafts/discard
pub async fn handle_discard_draft(
    State(state): State<AppState>,
    Json(draft): Json<ProjectDraft>,
) -> Result<ProjectsResponse, AppError> {
    let ctx = state.edit_context();
    let grant = ctx.require()?;
    state.projects.lock().await.discard_draft(grant, &draft).await;
    Ok(projects_response(&state, ctx, None).await)
}

/// POST /api/v1/sections/projects/load-more
pub async fn handle_load_more(State(state): State<AppState>) -> ProjectsResponse {
    let ctx = state.edit_context();
    state.projects.lock().await.load_more();
    projects_response(&state, ctx, None).await
}

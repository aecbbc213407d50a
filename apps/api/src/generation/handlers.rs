//! Axum route handlers for the Generation API.
//!
//! Generation results are returned to the caller only. Nothing here touches
//! the persistence gateway; saving a draft is a separate, explicit write.

use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::content::{validate_skills, validate_work_experience, ResumeContent};
use crate::errors::AppError;
use crate::generation::generator::{
    generate_resume, suggest_skills, suggest_summary, GenerateResumeRequest,
    SkillSuggestionRequest, SkillSuggestionResponse, SummarySuggestion, SummarySuggestionRequest,
};
use crate::state::AppState;

/// POST /api/generate-resume
///
/// Responds with the draft document itself; identity fields are blank.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeContent>, AppError> {
    tracing::debug!("User {} requested a resume draft", user.user_id);
    let content = generate_resume(state.completion.as_ref(), &request).await?;
    Ok(Json(content))
}

/// POST /api/suggestions/skills
///
/// When `currentSkills` is supplied the response also carries the merged set:
/// current skills first, then unseen suggestions.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<SkillSuggestionRequest>,
) -> Result<Json<SkillSuggestionResponse>, AppError> {
    tracing::debug!("User {} requested skill suggestions", user.user_id);
    let mut errors = Vec::new();
    let work_experience =
        validate_work_experience(request.work_experience.as_ref()).unwrap_or_else(|mut e| {
            errors.append(&mut e);
            Vec::new()
        });
    let current = match request.current_skills.as_ref() {
        Some(value) => validate_skills(Some(value), "currentSkills")
            .map(Some)
            .unwrap_or_else(|mut e| {
                errors.append(&mut e);
                None
            }),
        None => None,
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let skills = suggest_skills(state.completion.as_ref(), &work_experience).await?;
    let merged = current.map(|mut merged| {
        merged.merge(skills.iter());
        merged
    });

    Ok(Json(SkillSuggestionResponse { skills, merged }))
}

/// POST /api/suggestions/summary
pub async fn handle_suggest_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<SummarySuggestionRequest>,
) -> Result<Json<SummarySuggestion>, AppError> {
    tracing::debug!("User {} requested a summary suggestion", user.user_id);
    let work_experience =
        validate_work_experience(request.work_experience.as_ref()).map_err(AppError::Validation)?;
    let summary =
        suggest_summary(state.completion.as_ref(), &request.title, &work_experience).await?;
    Ok(Json(SummarySuggestion { summary }))
}

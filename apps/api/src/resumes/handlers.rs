//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::content::{validate, FieldError, ResumeContent, ValidationProfile};
use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch, DEFAULT_TITLE};
use crate::render::{to_pdf, RenderedDocument, TemplateVariant};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Untyped on purpose: the validator, not serde, decides what is acceptable.
#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    /// Overrides the stored template for this render only.
    pub template: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary checks
// ────────────────────────────────────────────────────────────────────────────

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Resume {raw} not found")))
}

fn parse_template(raw: &str, errors: &mut Vec<FieldError>) -> Option<TemplateVariant> {
    match raw.trim().parse::<TemplateVariant>() {
        Ok(variant) => Some(variant),
        Err(_) => {
            errors.push(FieldError {
                path: "template".to_string(),
                reason: format!(
                    "must be one of {}",
                    TemplateVariant::ALL.map(|v| v.as_str()).join(", ")
                ),
            });
            None
        }
    }
}

fn check_content(
    candidate: &Value,
    profile: ValidationProfile,
    errors: &mut Vec<FieldError>,
) -> Option<ResumeContent> {
    match validate(candidate, profile) {
        Ok(content) => Some(content),
        Err(mut field_errors) => {
            errors.append(&mut field_errors);
            None
        }
    }
}

/// Missing ids and other owners' ids are indistinguishable to the caller.
async fn owned_resume(state: &AppState, user: AuthUser, id: Uuid) -> Result<Resume, AppError> {
    match state.store.get(id).await? {
        Some(resume) if resume.user_id == user.user_id => Ok(resume),
        _ => Err(AppError::NotFound(format!("Resume {id} not found"))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.store.list(user.user_id).await?))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(owned_resume(&state, user, id).await?))
}

/// POST /api/resumes
///
/// Title defaults to "Untitled Resume", template to classic, content to an
/// empty document. Supplied content is checked as a draft: identity fields
/// may still be blank (a generated draft), every entry must be complete.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let mut errors = Vec::new();

    let template = match request.template.as_deref() {
        Some(raw) => parse_template(raw, &mut errors),
        None => Some(TemplateVariant::default()),
    };
    let content = match request.content.as_ref() {
        Some(candidate) => check_content(candidate, ValidationProfile::Draft, &mut errors),
        None => Some(ResumeContent::default()),
    };

    let (Some(template), Some(content), true) = (template, content, errors.is_empty()) else {
        return Err(AppError::Validation(errors));
    };

    let title = request
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let resume = state
        .store
        .create(
            user.user_id,
            NewResume {
                title,
                template,
                content,
            },
        )
        .await?;

    info!("Created resume {} for user {}", resume.id, user.user_id);
    Ok((StatusCode::CREATED, Json(resume)))
}

/// PATCH /api/resumes/:id
///
/// Shallow merge of the provided fields. Replacement content is the edited
/// document and must be complete, identity included; nothing is written when
/// any field fails.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&id)?;
    owned_resume(&state, user, id).await?;

    let mut errors = Vec::new();
    let mut patch = ResumePatch::default();

    if let Some(title) = request.title {
        let title = title.trim();
        if title.is_empty() {
            errors.push(FieldError {
                path: "title".to_string(),
                reason: "must not be empty".to_string(),
            });
        } else {
            patch.title = Some(title.to_string());
        }
    }
    if let Some(raw) = request.template.as_deref() {
        patch.template = parse_template(raw, &mut errors);
    }
    if let Some(candidate) = request.content.as_ref() {
        patch.content = check_content(candidate, ValidationProfile::Document, &mut errors);
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let updated = state
        .store
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    owned_resume(&state, user, id).await?;

    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!("Deleted resume {id} for user {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

async fn resolve_render(
    state: &AppState,
    user: AuthUser,
    raw_id: &str,
    query: RenderQuery,
) -> Result<(Resume, TemplateVariant), AppError> {
    let id = parse_id(raw_id)?;
    let resume = owned_resume(state, user, id).await?;

    let variant = match query.template.as_deref() {
        Some(raw) => {
            let mut errors = Vec::new();
            parse_template(raw, &mut errors).ok_or(AppError::Validation(errors))?
        }
        None => resume.template,
    };
    Ok((resume, variant))
}

/// Layout and PDF encoding are CPU-bound; keep them off the async workers.
async fn render_pdf(content: ResumeContent, variant: TemplateVariant) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || to_pdf(&variant.render(&content)))
        .await
        .map_err(|e| AppError::Render(format!("render task failed: {e}")))??;
    Ok(bytes)
}

/// `My Resume 2024` → `my-resume-2024.pdf`
pub fn pdf_filename(title: &str) -> String {
    let slug: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{slug}.pdf")
    }
}

fn pdf_response(bytes: Vec<u8>, disposition: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// GET /api/resumes/:id/pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let (resume, variant) = resolve_render(&state, user, &id, query).await?;
    let filename = pdf_filename(&resume.title);
    let bytes = render_pdf(resume.content, variant).await?;

    info!("Rendered {} ({variant}, {} bytes)", filename, bytes.len());
    Ok(pdf_response(
        bytes,
        format!("attachment; filename=\"{filename}\""),
    ))
}

/// GET /api/resumes/:id/preview
pub async fn handle_preview_pdf(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let (resume, variant) = resolve_render(&state, user, &id, query).await?;
    let filename = pdf_filename(&resume.title);
    let bytes = render_pdf(resume.content, variant).await?;
    Ok(pdf_response(bytes, format!("inline; filename=\"{filename}\"")))
}

/// GET /api/resumes/:id/layout
///
/// The page model the PDF is drawn from, as JSON.
pub async fn handle_layout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedDocument>, AppError> {
    let (resume, variant) = resolve_render(&state, user, &id, query).await?;
    let content = resume.content;
    let document = tokio::task::spawn_blocking(move || variant.render(&content))
        .await
        .map_err(|e| AppError::Render(format!("layout task failed: {e}")))?;
    Ok(Json(document))
}

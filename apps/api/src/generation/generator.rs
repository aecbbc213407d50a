//! Generation Orchestrator — drafts resume content through the Completion Service.
//!
//! Three request kinds share one shape: build a prompt, make exactly one
//! completion call, parse the reply as a single JSON object, and push it
//! through the same validator used for user input. Nothing the model says
//! reaches a caller without passing that boundary.
//!
//! Failures (transport, non-JSON, validation) all surface as
//! `AppError::GenerationFailed`. Nothing is retried here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::content::validation::IDENTITY_FIELDS;
use crate::content::{
    validate, validate_skills, FieldError, OrderedSkillSet, ResumeContent, ValidationProfile,
    WorkExperienceEntry,
};
use crate::errors::AppError;
use crate::generation::prompts::{
    GENERATION_SYSTEM, RESUME_PROMPT_TEMPLATE, SKILLS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::NO_PERSONAL_DATA_INSTRUCTION;
use crate::llm_client::{strip_json_fences, CompletionService};

// ────────────────────────────────────────────────────────────────────────────
// Request / response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    pub job_title: String,
    /// Free text ("5", "5+", "about five").
    pub years_of_experience: String,
    pub industry: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Untyped like the resume write requests: half-filled form entries are
/// reported field by field instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestionRequest {
    #[serde(default)]
    pub work_experience: Option<Value>,
    /// When present, the response also carries the merged skill set.
    #[serde(default)]
    pub current_skills: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillSuggestionResponse {
    pub skills: OrderedSkillSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<OrderedSkillSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySuggestionRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub work_experience: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySuggestion {
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Full-document generation
// ────────────────────────────────────────────────────────────────────────────

/// Drafts a complete document. Identity fields in the result are always blank
/// (the profile picture and network link are absent): they belong to the
/// authenticated user and are filled in before saving.
pub async fn generate_resume(
    completion: &dyn CompletionService,
    request: &GenerateResumeRequest,
) -> Result<ResumeContent, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "jobTitle cannot be empty".to_string(),
        ));
    }

    let skills = request
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let prompt = RESUME_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title.trim())
        .replace("{years_of_experience}", request.years_of_experience.trim())
        .replace("{industry}", request.industry.trim())
        .replace("{skills}", &skills)
        .replace("{no_personal_data}", NO_PERSONAL_DATA_INSTRUCTION);

    info!("Generating resume draft for job title {:?}", request.job_title);
    let mut draft = request_object(completion, "resume", &prompt).await?;
    blank_identity(&mut draft);

    let content = validate(&Value::Object(draft), ValidationProfile::Draft)
        .map_err(|errors| rejected("resume", &errors))?;

    info!(
        "Resume draft accepted: {} work entries, {} education entries, {} skills",
        content.work_experience.len(),
        content.education.len(),
        content.skills.len()
    );
    Ok(content)
}

/// Overwrites whatever identity data the model produced.
fn blank_identity(draft: &mut Map<String, Value>) {
    let details = draft
        .entry("personalDetails")
        .or_insert_with(|| Value::Object(Map::new()));
    if !details.is_object() {
        *details = Value::Object(Map::new());
    }
    if let Some(details) = details.as_object_mut() {
        for field in IDENTITY_FIELDS {
            details.insert((*field).to_string(), Value::String(String::new()));
        }
        details.remove("profilePicture");
        details.remove("linkedin");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill suggestions
// ────────────────────────────────────────────────────────────────────────────

/// Suggests skills for the given work history. The result is deduplicated;
/// merging into an existing set is the caller's call (`OrderedSkillSet::merge`).
pub async fn suggest_skills(
    completion: &dyn CompletionService,
    work_experience: &[WorkExperienceEntry],
) -> Result<OrderedSkillSet, AppError> {
    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{work_experience_json}", &work_experience_json(work_experience)?);

    let reply = request_object(completion, "skills", &prompt).await?;

    let skills = match reply.get("skills") {
        Some(list) if list.is_array() => {
            validate_skills(Some(list), "skills").map_err(|errors| rejected("skills", &errors))?
        }
        _ => {
            return Err(AppError::GenerationFailed(
                "Skill suggestion reply did not contain a skills array".to_string(),
            ))
        }
    };

    info!("Skill suggestion accepted: {} skills", skills.len());
    Ok(skills)
}

// ────────────────────────────────────────────────────────────────────────────
// Summary suggestions
// ────────────────────────────────────────────────────────────────────────────

/// Suggests a professional summary. Rejects an empty work history before
/// spending a completion call on it.
pub async fn suggest_summary(
    completion: &dyn CompletionService,
    title: &str,
    work_experience: &[WorkExperienceEntry],
) -> Result<String, AppError> {
    if work_experience.is_empty() {
        return Err(AppError::InvalidRequest(
            "workExperience must contain at least one entry to suggest a summary".to_string(),
        ));
    }

    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{title}", title.trim())
        .replace("{work_experience_json}", &work_experience_json(work_experience)?)
        .replace("{no_personal_data}", NO_PERSONAL_DATA_INSTRUCTION);

    let reply = request_object(completion, "summary", &prompt).await?;

    let summary = match reply.get("summary") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::String(_)) => {
            return Err(rejected(
                "summary",
                &[FieldError {
                    path: "summary".to_string(),
                    reason: "must not be empty".to_string(),
                }],
            ))
        }
        _ => {
            return Err(AppError::GenerationFailed(
                "Summary suggestion reply did not contain a summary string".to_string(),
            ))
        }
    };

    info!("Summary suggestion accepted ({} chars)", summary.len());
    Ok(summary)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared plumbing
// ────────────────────────────────────────────────────────────────────────────

/// One completion call, parsed as a single JSON object.
async fn request_object(
    completion: &dyn CompletionService,
    kind: &str,
    prompt: &str,
) -> Result<Map<String, Value>, AppError> {
    let text = completion
        .complete(prompt, GENERATION_SYSTEM)
        .await
        .map_err(|e| {
            warn!("Completion call for {kind} failed: {e}");
            AppError::GenerationFailed(format!("Completion service call failed: {e}"))
        })?;

    match serde_json::from_str::<Value>(strip_json_fences(&text)) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => {
            warn!("Completion reply for {kind} was JSON but not an object");
            Err(AppError::GenerationFailed(
                "Model output was not a JSON object".to_string(),
            ))
        }
        Err(e) => {
            warn!("Completion reply for {kind} was not valid JSON: {e}");
            Err(AppError::GenerationFailed(format!(
                "Model output was not valid JSON: {e}"
            )))
        }
    }
}

fn rejected(kind: &str, errors: &[FieldError]) -> AppError {
    let detail = errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.reason))
        .collect::<Vec<_>>()
        .join("; ");
    warn!("Generated {kind} failed validation: {detail}");
    AppError::GenerationFailed(format!("Generated {kind} failed validation: {detail}"))
}

fn work_experience_json(work_experience: &[WorkExperienceEntry]) -> Result<String, AppError> {
    serde_json::to_string_pretty(work_experience).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize work experience: {e}"))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::llm_client::LlmError;

    /// Completion Service double that replays a canned reply and counts calls.
    pub(crate) struct MockCompletion {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl MockCompletion {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_prompt(&self) -> String {
            self.last_prompt.lock().unwrap().clone().unwrap_or_default()
        }
    }

    #[async_trait]
    impl CompletionService for MockCompletion {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    fn work_entry() -> WorkExperienceEntry {
        WorkExperienceEntry {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            start_date: "2020-01".to_string(),
            end_date: "2022-06".to_string(),
            description: "Built billing pipelines".to_string(),
        }
    }

    fn request() -> GenerateResumeRequest {
        GenerateResumeRequest {
            job_title: "Backend Engineer".to_string(),
            years_of_experience: "5".to_string(),
            industry: "Fintech".to_string(),
            skills: vec!["Rust".to_string(), " Postgres ".to_string()],
        }
    }

    const FABRICATED_DRAFT: &str = r#"{
        "personalDetails": {
            "fullName": "Jane Invented",
            "email": "jane@invented.example",
            "phone": "+1 555 0100",
            "location": "Nowhere",
            "linkedin": "linkedin.com/in/jane-invented",
            "profilePicture": "data:image/png;base64,AAAA",
            "summary": "Backend engineer with five years in payments."
        },
        "workExperience": [{
            "title": "Backend Engineer",
            "company": "PayCo",
            "location": "Berlin, Germany",
            "startDate": "2019-03",
            "endDate": "Present",
            "description": "Scaled the ledger service to 10k TPS."
        }],
        "education": [{
            "degree": "BSc Computer Science",
            "institution": "TU Berlin",
            "location": "Berlin, Germany",
            "graduationYear": "2018"
        }],
        "skills": ["Rust", "Postgres", "Rust"]
    }"#;

    #[tokio::test]
    async fn test_generate_blanks_fabricated_identity() {
        let mock = MockCompletion::replying(FABRICATED_DRAFT);
        let content = generate_resume(&mock, &request()).await.unwrap();

        let pd = &content.personal_details;
        assert_eq!(pd.email, "");
        assert_eq!(pd.full_name, "");
        assert_eq!(pd.phone, "");
        assert_eq!(pd.location, "");
        assert!(pd.profile_picture.is_none());
        assert!(pd.linkedin.is_none());
        assert_eq!(
            pd.summary.as_deref(),
            Some("Backend engineer with five years in payments.")
        );
        assert_eq!(content.skills.as_slice(), &["Rust", "Postgres"]);
        assert!(content.projects.is_empty());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_prompt_carries_inputs() {
        let mock = MockCompletion::replying(FABRICATED_DRAFT);
        generate_resume(&mock, &request()).await.unwrap();
        let prompt = mock.last_prompt();
        assert!(prompt.contains("Backend Engineer with 5 years"));
        assert!(prompt.contains("Fintech industry"));
        assert!(prompt.contains("Rust, Postgres"));
        assert!(!prompt.contains("{skills}"));
    }

    #[tokio::test]
    async fn test_generate_accepts_fenced_json() {
        let mock = MockCompletion::replying(&format!("```json\n{FABRICATED_DRAFT}\n```"));
        assert!(generate_resume(&mock, &request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_fails_on_non_json() {
        let mock = MockCompletion::replying("Sure! Here is your resume: ...");
        let err = generate_resume(&mock, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(ref m) if m.contains("not valid JSON")));
    }

    #[tokio::test]
    async fn test_generate_fails_on_json_array() {
        let mock = MockCompletion::replying("[1, 2, 3]");
        let err = generate_resume(&mock, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_reports_validator_paths() {
        let mock = MockCompletion::replying(
            r#"{"workExperience": [{"title": "Engineer", "location": "X",
                "startDate": "2020-01", "endDate": "2021-01", "description": "d"}]}"#,
        );
        let err = generate_resume(&mock, &request()).await.unwrap_err();
        match err {
            AppError::GenerationFailed(msg) => {
                assert!(msg.contains("workExperience[0].company"), "{msg}")
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_survives_missing_personal_details() {
        let mock = MockCompletion::replying(r#"{"skills": ["Go"], "personalDetails": "oops"}"#);
        let content = generate_resume(&mock, &request()).await.unwrap();
        assert_eq!(content.personal_details.email, "");
        assert!(content.personal_details.summary.is_none());
    }

    #[tokio::test]
    async fn test_generate_maps_transport_error() {
        let mock = MockCompletion::failing(503);
        let err = generate_resume(&mock, &request()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(ref m) if m.contains("503")));
        assert_eq!(mock.calls(), 1, "no automatic retries");
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_job_title_locally() {
        let mock = MockCompletion::replying(FABRICATED_DRAFT);
        let mut req = request();
        req.job_title = "  ".to_string();
        let err = generate_resume(&mock, &req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggest_skills_dedups() {
        let mock = MockCompletion::replying(r#"{"skills": ["Go", "Go", "Rust"]}"#);
        let skills = suggest_skills(&mock, &[work_entry()]).await.unwrap();
        assert_eq!(skills.as_slice(), &["Go", "Rust"]);
        assert!(mock.last_prompt().contains("\"company\": \"Acme\""));
    }

    #[tokio::test]
    async fn test_suggested_skills_merge_into_existing() {
        let mock = MockCompletion::replying(r#"{"skills": ["Go", "Go", "Rust"]}"#);
        let suggested = suggest_skills(&mock, &[work_entry()]).await.unwrap();
        let mut existing: OrderedSkillSet = ["Rust", "SQL"].into_iter().collect();
        existing.merge(suggested.iter());
        assert_eq!(existing.as_slice(), &["Rust", "SQL", "Go"]);
    }

    #[tokio::test]
    async fn test_suggest_skills_rejects_bad_shape() {
        let mock = MockCompletion::replying(r#"{"skills": "Go, Rust"}"#);
        assert!(matches!(
            suggest_skills(&mock, &[work_entry()]).await,
            Err(AppError::GenerationFailed(_))
        ));

        let mock = MockCompletion::replying(r#"{"skills": ["Go", 7]}"#);
        match suggest_skills(&mock, &[work_entry()]).await {
            Err(AppError::GenerationFailed(msg)) => assert!(msg.contains("skills[1]"), "{msg}"),
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_suggest_summary_rejects_empty_history_without_calling() {
        let mock = MockCompletion::replying(r#"{"summary": "never used"}"#);
        let err = suggest_summary(&mock, "Engineer", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggest_summary_returns_trimmed_text() {
        let mock = MockCompletion::replying(r#"{"summary": "  Seasoned engineer.  "}"#);
        let summary = suggest_summary(&mock, "Engineer", &[work_entry()])
            .await
            .unwrap();
        assert_eq!(summary, "Seasoned engineer.");
        assert_eq!(mock.calls(), 1);
        assert!(mock.last_prompt().contains("summary for a Engineer"));
    }

    #[tokio::test]
    async fn test_suggest_summary_rejects_blank_or_missing() {
        let mock = MockCompletion::replying(r#"{"summary": "   "}"#);
        assert!(matches!(
            suggest_summary(&mock, "Engineer", &[work_entry()]).await,
            Err(AppError::GenerationFailed(_))
        ));

        let mock = MockCompletion::replying(r#"{"text": "wrong key"}"#);
        assert!(matches!(
            suggest_summary(&mock, "Engineer", &[work_entry()]).await,
            Err(AppError::GenerationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_replaces_existing_wholesale() {
        let mock = MockCompletion::replying(r#"{"summary": "New summary."}"#);
        let mut content = ResumeContent::default();
        content.personal_details.summary = Some("Old summary.".to_string());
        let summary = suggest_summary(&mock, "Engineer", &[work_entry()])
            .await
            .unwrap();
        content.replace_summary(&summary);
        assert_eq!(content.personal_details.summary.as_deref(), Some("New summary."));
    }
}

//! Structural validation of candidate resume documents.
//!
//! One rule set backs both direct user submissions and Completion Service
//! output. The validator reads an untyped `serde_json::Value`, collects every
//! field-level failure, and only hands back a typed [`ResumeContent`] when the
//! whole document is acceptable. It never checks plausibility (date order,
//! real years): shape and type only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::models::{
    EducationEntry, PersonalDetails, ProjectEntry, ResumeContent, WorkExperienceEntry,
};
use crate::content::skills::OrderedSkillSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub reason: String,
}

impl FieldError {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Which rule set variant to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationProfile {
    /// Replacement content on update: the complete document.
    Document,
    /// Generator output and newly created resumes. Identity fields may be
    /// blank; everything else is checked as for `Document`.
    Draft,
}

/// Personal-details fields that must come from the authenticated user.
pub const IDENTITY_FIELDS: &[&str] = &["fullName", "email", "phone", "location"];

/// Validates `candidate` and returns the typed document or every failure found.
pub fn validate(
    candidate: &Value,
    profile: ValidationProfile,
) -> Result<ResumeContent, Vec<FieldError>> {
    let mut cx = Checker::default();

    let Some(root) = candidate.as_object() else {
        return Err(vec![FieldError::new("", "expected an object")]);
    };

    let personal_details = cx.personal_details(root.get("personalDetails"), profile);
    let work_experience = cx.sequence(
        root.get("workExperience"),
        "workExperience",
        Checker::work_entry,
    );
    let education = cx.sequence(root.get("education"), "education", Checker::education_entry);
    let projects = cx.sequence(root.get("projects"), "projects", Checker::project_entry);
    let skills = cx.string_list(root.get("skills"), "skills").into();

    cx.finish(ResumeContent {
        personal_details,
        work_experience,
        education,
        skills,
        projects,
    })
}

/// Validates a standalone skill list found at `path`. Absent reads as empty.
pub fn validate_skills(
    value: Option<&Value>,
    path: &str,
) -> Result<OrderedSkillSet, Vec<FieldError>> {
    let mut cx = Checker::default();
    let skills: OrderedSkillSet = cx.string_list(value, path).into();
    cx.finish(skills)
}

/// Validates a standalone `workExperience` sequence, as sent with suggestion
/// requests. Absent reads as empty.
pub fn validate_work_experience(
    value: Option<&Value>,
) -> Result<Vec<WorkExperienceEntry>, Vec<FieldError>> {
    let mut cx = Checker::default();
    let entries = cx.sequence(value, "workExperience", Checker::work_entry);
    cx.finish(entries)
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    fn fail(&mut self, path: &str, reason: &str) {
        self.errors.push(FieldError::new(path, reason));
    }

    /// Required non-empty string. Returns the trimmed value (empty on failure).
    fn required(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> String {
        self.string_field(obj, parent, key, false)
    }

    /// Required string that may be blank (identity fields of a generated draft).
    fn blankable(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> String {
        self.string_field(obj, parent, key, true)
    }

    fn string_field(
        &mut self,
        obj: &Map<String, Value>,
        parent: &str,
        key: &str,
        allow_blank: bool,
    ) -> String {
        let path = join(parent, key);
        match obj.get(key) {
            None | Some(Value::Null) => {
                if allow_blank {
                    return String::new();
                }
                self.fail(&path, "is required");
                String::new()
            }
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() && !allow_blank {
                    self.fail(&path, "must not be empty");
                }
                trimmed.to_string()
            }
            Some(_) => {
                self.fail(&path, "must be a string");
                String::new()
            }
        }
    }

    /// Optional string: absent or null is fine, present must be non-empty.
    fn optional(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
        let path = join(parent, key);
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    self.fail(&path, "must not be empty when present");
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Some(_) => {
                self.fail(&path, "must be a string");
                None
            }
        }
    }

    fn object<'v>(&mut self, value: Option<&'v Value>, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Some(Value::Object(map)) => Some(map),
            None | Some(Value::Null) => {
                self.fail(path, "is required");
                None
            }
            Some(_) => {
                self.fail(path, "must be an object");
                None
            }
        }
    }

    fn personal_details(
        &mut self,
        value: Option<&Value>,
        profile: ValidationProfile,
    ) -> PersonalDetails {
        const PATH: &str = "personalDetails";
        let Some(obj) = self.object(value, PATH) else {
            return PersonalDetails::default();
        };

        let identity = |cx: &mut Self, key: &str| match profile {
            ValidationProfile::Document => cx.required(obj, PATH, key),
            ValidationProfile::Draft => cx.blankable(obj, PATH, key),
        };

        let full_name = identity(self, "fullName");
        let email = identity(self, "email");
        let phone = identity(self, "phone");
        let location = identity(self, "location");
        let linkedin = self.optional(obj, PATH, "linkedin");
        let profile_picture = self.optional(obj, PATH, "profilePicture");
        let summary = self.optional(obj, PATH, "summary");

        if let Some(picture) = &profile_picture {
            if !is_data_uri(picture) {
                self.fail(
                    &join(PATH, "profilePicture"),
                    "must be a data: URI (data:<media-type>[;base64],<payload>)",
                );
            }
        }

        PersonalDetails {
            full_name,
            email,
            phone,
            location,
            linkedin,
            profile_picture,
            summary,
        }
    }

    /// Absent sequence reads as empty; each element goes through `entry`.
    fn sequence<T>(
        &mut self,
        value: Option<&Value>,
        key: &str,
        entry: fn(&mut Self, &Map<String, Value>, &str) -> T,
    ) -> Vec<T> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let path = format!("{key}[{i}]");
                    match item.as_object() {
                        Some(obj) => Some(entry(self, obj, &path)),
                        None => {
                            self.fail(&path, "must be an object");
                            None
                        }
                    }
                })
                .collect(),
            Some(_) => {
                self.fail(key, "must be an array");
                Vec::new()
            }
        }
    }

    fn work_entry(&mut self, obj: &Map<String, Value>, path: &str) -> WorkExperienceEntry {
        WorkExperienceEntry {
            title: self.required(obj, path, "title"),
            company: self.required(obj, path, "company"),
            location: self.required(obj, path, "location"),
            start_date: self.required(obj, path, "startDate"),
            end_date: self.required(obj, path, "endDate"),
            description: self.required(obj, path, "description"),
        }
    }

    fn education_entry(&mut self, obj: &Map<String, Value>, path: &str) -> EducationEntry {
        EducationEntry {
            degree: self.required(obj, path, "degree"),
            institution: self.required(obj, path, "institution"),
            location: self.required(obj, path, "location"),
            graduation_year: self.required(obj, path, "graduationYear"),
        }
    }

    fn project_entry(&mut self, obj: &Map<String, Value>, path: &str) -> ProjectEntry {
        let title = self.required(obj, path, "title");
        let description = self.required(obj, path, "description");
        let technologies = self.string_list(obj.get("technologies"), &join(path, "technologies"));
        let link = self.optional(obj, path, "link");
        ProjectEntry {
            title,
            description,
            technologies,
            link,
        }
    }

    /// Array of non-empty strings; absent reads as empty.
    fn string_list(&mut self, value: Option<&Value>, path: &str) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let item_path = format!("{path}[{i}]");
                    match item.as_str().map(str::trim) {
                        Some("") => {
                            self.fail(&item_path, "must not be empty");
                            None
                        }
                        Some(s) => Some(s.to_string()),
                        None => {
                            self.fail(&item_path, "must be a string");
                            None
                        }
                    }
                })
                .collect(),
            Some(_) => {
                self.fail(path, "must be an array");
                Vec::new()
            }
        }
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// `data:<media-type>[;params],<payload>` with a non-empty payload.
fn is_data_uri(s: &str) -> bool {
    s.strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .is_some_and(|(meta, payload)| !meta.is_empty() && !payload.is_empty())
}

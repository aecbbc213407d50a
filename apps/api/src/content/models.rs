use serde::{Deserialize, Serialize};

use crate::content::skills::OrderedSkillSet;

/// End-date marker for a position the candidate still holds.
pub const ONGOING_MARKER: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Inline image as a self-describing `data:` URI. Carried opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    /// `YYYY-MM`
    pub start_date: String,
    /// `YYYY-MM`, or [`ONGOING_MARKER`].
    pub end_date: String,
    pub description: String,
}

impl WorkExperienceEntry {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.eq_ignore_ascii_case(ONGOING_MARKER)
    }

    /// `start - end`, with the ongoing marker normalised.
    pub fn date_range(&self) -> String {
        let end = if self.is_ongoing() {
            ONGOING_MARKER
        } else {
            self.end_date.as_str()
        };
        format!("{} - {}", self.start_date, end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProjectEntry {
    pub fn technologies_line(&self) -> String {
        self.technologies.join(", ")
    }
}

/// The unit validated, generated, stored and rendered as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContent {
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: OrderedSkillSet,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl ResumeContent {
    /// Replaces the summary wholesale. A blank summary clears the field.
    pub fn replace_summary(&mut self, summary: &str) {
        let trimmed = summary.trim();
        self.personal_details.summary = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Contact fields in display order, skipping anything blank or absent.
    pub fn contact_fields(&self) -> Vec<&str> {
        let pd = &self.personal_details;
        [
            Some(pd.email.as_str()),
            Some(pd.phone.as_str()),
            Some(pd.location.as_str()),
            pd.linkedin.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect()
    }
}

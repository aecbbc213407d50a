//! Template variants.
//!
//! Each variant implements [`Template`]; [`TemplateVariant`] is the tag
//! stored with a resume and picks the implementation. Adding a variant means
//! one enum case and one `Template` impl.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ResumeContent;
use crate::render::flow::PageSet;
use crate::render::model::{Element, PageSize, RenderedDocument};

mod classic;
mod sections;
mod sidebar;

pub use classic::ClassicTemplate;
pub use sidebar::{SidebarTemplate, SidebarWithProfileTemplate};

/// A layout algorithm over one document.
pub trait Template: Sync {
    fn variant(&self) -> TemplateVariant;

    /// Elements painted underneath the content of every page.
    fn background(&self, _size: PageSize) -> Vec<Element> {
        Vec::new()
    }

    fn layout(&self, content: &ResumeContent, pages: &mut PageSet);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    #[default]
    Classic,
    Sidebar,
    SidebarWithProfile,
}

static CLASSIC: ClassicTemplate = ClassicTemplate;
static SIDEBAR: SidebarTemplate = SidebarTemplate;
static SIDEBAR_WITH_PROFILE: SidebarWithProfileTemplate = SidebarWithProfileTemplate;

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 3] = [
        TemplateVariant::Classic,
        TemplateVariant::Sidebar,
        TemplateVariant::SidebarWithProfile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateVariant::Classic => "classic",
            TemplateVariant::Sidebar => "sidebar",
            TemplateVariant::SidebarWithProfile => "sidebar_with_profile",
        }
    }

    pub fn template(self) -> &'static dyn Template {
        match self {
            TemplateVariant::Classic => &CLASSIC,
            TemplateVariant::Sidebar => &SIDEBAR,
            TemplateVariant::SidebarWithProfile => &SIDEBAR_WITH_PROFILE,
        }
    }

    /// Lays out `content` on A4 pages. Pure: same input, same output.
    pub fn render(self, content: &ResumeContent) -> RenderedDocument {
        let template = self.template();
        let size = PageSize::A4;
        let mut pages = PageSet::new(size, template.background(size));
        template.layout(content, &mut pages);
        RenderedDocument {
            variant: template.variant(),
            page_size: size,
            pages: pages.into_pages(),
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown template variant: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateVariant {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::{EducationEntry, PersonalDetails, ProjectEntry, WorkExperienceEntry};

    fn work(title: &str, company: &str) -> WorkExperienceEntry {
        WorkExperienceEntry {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            start_date: "2020-01".to_string(),
            end_date: "2022-06".to_string(),
            description: "Built and ran the billing platform.".to_string(),
        }
    }

    fn sample() -> ResumeContent {
        ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "London".to_string(),
                linkedin: None,
                profile_picture: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
                summary: Some("Engineer who likes engines.".to_string()),
            },
            work_experience: vec![work("Engineer", "Acme"), work("Intern", "Initech")],
            education: vec![EducationEntry {
                degree: "BSc Mathematics".to_string(),
                institution: "University of London".to_string(),
                location: "London".to_string(),
                graduation_year: "2019".to_string(),
            }],
            skills: ["Rust", "SQL", "Go"].into_iter().collect(),
            projects: vec![ProjectEntry {
                title: "Analytical Engine".to_string(),
                description: "A general-purpose computer.".to_string(),
                technologies: vec!["Brass".to_string(), "Steam".to_string()],
                link: None,
            }],
        }
    }

    /// The create-then-render scenario: one job, everything else empty.
    fn backend_engineer() -> ResumeContent {
        ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Sam Doe".to_string(),
                email: "sam@example.com".to_string(),
                phone: "555-0101".to_string(),
                location: "Berlin".to_string(),
                ..PersonalDetails::default()
            },
            work_experience: vec![WorkExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Berlin".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2022-06".to_string(),
                description: "Backend services.".to_string(),
            }],
            ..ResumeContent::default()
        }
    }

    #[test]
    fn test_variant_identifiers() {
        for variant in TemplateVariant::ALL {
            assert_eq!(variant.as_str().parse::<TemplateVariant>().unwrap(), variant);
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.as_str()));
        }
        assert!("modern".parse::<TemplateVariant>().is_err());
        assert_eq!(TemplateVariant::default(), TemplateVariant::Classic);
    }

    #[test]
    fn test_render_is_deterministic() {
        let content = sample();
        for variant in TemplateVariant::ALL {
            assert_eq!(variant.render(&content), variant.render(&content));
        }
    }

    #[test]
    fn test_classic_backend_engineer_scenario() {
        let doc = TemplateVariant::Classic.render(&backend_engineer());
        assert_eq!(doc.variant, TemplateVariant::Classic);
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.contains_text("WORK EXPERIENCE"));
        assert!(doc.contains_text("Engineer"));
        assert!(doc.contains_text("Acme"));
        assert!(doc.contains_text("2020-01 - 2022-06"));
        assert!(!doc.contains_text("EDUCATION"));
        assert!(!doc.contains_text("SKILLS"));
        assert!(!doc.contains_text("PROJECTS"));
    }

    #[test]
    fn test_empty_education_omitted_in_every_variant() {
        let mut content = sample();
        content.education.clear();
        for variant in TemplateVariant::ALL {
            let doc = variant.render(&content);
            assert!(!doc.contains_text("EDUCATION"), "{variant}");
            assert!(doc.contains_text("WORK EXPERIENCE"), "{variant}");
        }
    }

    #[test]
    fn test_classic_has_no_image_or_summary() {
        let doc = TemplateVariant::Classic.render(&sample());
        assert_eq!(doc.images().count(), 0);
        assert!(!doc.contains_text("SUMMARY"));
        assert!(!doc.contains_text("Engineer who likes engines."));
    }

    #[test]
    fn test_sidebar_has_no_image_or_summary() {
        let doc = TemplateVariant::Sidebar.render(&sample());
        assert_eq!(doc.images().count(), 0);
        assert!(!doc.contains_text("SUMMARY"));
        assert!(doc.contains_text("SKILLS"));
    }

    #[test]
    fn test_sidebar_with_profile_surfaces_image_and_summary() {
        let content = sample();
        let doc = TemplateVariant::SidebarWithProfile.render(&content);
        assert!(doc.contains_text("SUMMARY"));
        assert!(doc.contains_text("Engineer who likes engines."));

        let images: Vec<_> = doc.images().collect();
        assert_eq!(images.len(), 1);
        match images[0] {
            Element::Image { source, x, .. } => {
                assert_eq!(Some(source), content.personal_details.profile_picture.as_ref());
                assert!(*x < crate::render::theme::SIDEBAR_WIDTH);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_sidebar_with_profile_omits_absent_optionals() {
        let mut content = sample();
        content.personal_details.profile_picture = None;
        content.personal_details.summary = None;
        let doc = TemplateVariant::SidebarWithProfile.render(&content);
        assert_eq!(doc.images().count(), 0);
        assert!(!doc.contains_text("SUMMARY"));
    }

    #[test]
    fn test_entries_keep_stored_order() {
        let doc = TemplateVariant::Classic.render(&sample());
        let runs: Vec<&str> = doc.text_runs().collect();
        let engineer = runs.iter().position(|t| *t == "Engineer").unwrap();
        let intern = runs.iter().position(|t| *t == "Intern").unwrap();
        assert!(engineer < intern);

        let rust = runs.iter().position(|t| *t == "Rust").unwrap();
        let sql = runs.iter().position(|t| *t == "SQL").unwrap();
        let go = runs.iter().position(|t| *t == "Go").unwrap();
        assert!(rust < sql && sql < go);
    }

    #[test]
    fn test_contact_line_skips_absent_fields() {
        let doc = TemplateVariant::Classic.render(&sample());
        let runs: Vec<&str> = doc.text_runs().collect();
        assert!(runs.contains(&"ada@example.com \u{2022} 555-0100 \u{2022} London"));
        assert!(!doc.contains_text("linkedin"));

        let mut content = sample();
        content.personal_details.phone = "  ".to_string();
        content.personal_details.linkedin = Some("linkedin.com/in/ada".to_string());
        let doc = TemplateVariant::Classic.render(&content);
        let runs: Vec<&str> = doc.text_runs().collect();
        assert!(runs.contains(&"ada@example.com \u{2022} London \u{2022} linkedin.com/in/ada"));
    }

    #[test]
    fn test_sidebar_stacks_contact_fields() {
        let doc = TemplateVariant::Sidebar.render(&sample());
        let runs: Vec<&str> = doc.text_runs().collect();
        assert!(runs.contains(&"ada@example.com"));
        assert!(runs.contains(&"555-0100"));
        assert!(!doc.contains_text("ada@example.com \u{2022}"));
    }

    #[test]
    fn test_project_technologies_and_link() {
        let doc = TemplateVariant::Classic.render(&sample());
        assert!(doc.contains_text("Technologies: Brass, Steam"));
        assert!(!doc.contains_text("Link:"));

        let mut content = sample();
        content.projects[0].link = Some("https://example.com/engine".to_string());
        let doc = TemplateVariant::Sidebar.render(&content);
        assert!(doc.contains_text("Link: https://example.com/engine"));
    }

    #[test]
    fn test_classic_skills_render_as_chips() {
        let doc = TemplateVariant::Classic.render(&sample());
        let chips = doc.pages[0]
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Rect { corner_radius, .. } if *corner_radius > 0.0))
            .count();
        assert_eq!(chips, 3);
    }

    #[test]
    fn test_long_document_paginates() {
        let mut content = sample();
        content.work_experience = (0..40)
            .map(|i| work(&format!("Role {i}"), "Acme"))
            .collect();

        let doc = TemplateVariant::Classic.render(&content);
        assert!(doc.pages.len() > 1);
        let numbers: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, (1..=doc.pages.len() as u32).collect::<Vec<_>>());
        for page in &doc.pages {
            for element in &page.elements {
                if let Element::Text { y, .. } = element {
                    assert!(*y < doc.page_size.height - crate::render::theme::PAGE_MARGIN + 1.0);
                }
            }
        }

        let doc = TemplateVariant::Sidebar.render(&content);
        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            assert!(matches!(page.elements[0], Element::Rect { x, .. } if x == 0.0));
        }
    }
}

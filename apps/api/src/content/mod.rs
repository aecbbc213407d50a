// Content schema: the canonical shape of a resume document and the single
// validator that decides whether a candidate document is acceptable.

pub mod models;
pub mod skills;
pub mod validation;

pub use models::{
    EducationEntry, PersonalDetails, ProjectEntry, ResumeContent, WorkExperienceEntry,
};
pub use skills::OrderedSkillSet;
pub use validation::{
    validate, validate_skills, validate_work_experience, FieldError, ValidationProfile,
};

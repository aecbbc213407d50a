// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for every generation request kind.
pub const GENERATION_SYSTEM: &str = "You are an expert resume writer. \
    You write concise, specific, professional resume content. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Full-document draft prompt.
/// Replace: {job_title}, {years_of_experience}, {industry}, {skills}, {no_personal_data}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional resume for a {job_title} with {years_of_experience} years of experience in the {industry} industry. Include work experience, education, and incorporate these skills: {skills}.

Generate the content in a natural, professional style with specific examples and achievements. Return a JSON object with this EXACT structure:
{
  "personalDetails": {
    "summary": "Professional summary here..."
  },
  "workExperience": [
    {
      "title": "Job title",
      "company": "Company name",
      "location": "City, Country",
      "startDate": "YYYY-MM",
      "endDate": "YYYY-MM or Present",
      "description": "Detailed job description with achievements"
    }
  ],
  "education": [
    {
      "degree": "Degree name",
      "institution": "Institution name",
      "location": "City, Country",
      "graduationYear": "YYYY"
    }
  ],
  "skills": ["Skill 1", "Skill 2"]
}

{no_personal_data}

Make the content realistic and professional, with specific achievements and metrics where appropriate."#;

/// Skill suggestion prompt. Replace: {work_experience_json}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Suggest relevant professional skills based on the following job titles and experience.

Work Experience:
{work_experience_json}

Return a JSON object with this EXACT structure:
{ "skills": ["skill1", "skill2"] }

Each skill is a short name (one to three words). Do not repeat a skill."#;

/// Summary suggestion prompt. Replace: {title}, {work_experience_json}, {no_personal_data}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a compelling professional summary for a {title} based on their work experience. Make it concise, impactful, and highlight key achievements.

Work Experience:
{work_experience_json}

{no_personal_data}

Return a JSON object with this EXACT structure:
{ "summary": "generated text here" }"#;

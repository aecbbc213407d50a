use crate::content::ResumeContent;
use crate::render::flow::{Column, PageSet};
use crate::render::templates::{sections, Template, TemplateVariant};
use crate::render::theme::{DESCRIPTION_GAP, HEADER_GAP, NAME, PAGE_MARGIN};

/// Single column: header, work experience, education, skills, projects.
/// Never shows the image or the summary.
pub struct ClassicTemplate;

impl Template for ClassicTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Classic
    }

    fn layout(&self, content: &ResumeContent, pages: &mut PageSet) {
        let size = pages.size();
        let mut col = Column::new(
            PAGE_MARGIN,
            size.width - 2.0 * PAGE_MARGIN,
            PAGE_MARGIN,
            PAGE_MARGIN,
            size.height - PAGE_MARGIN,
        );

        sections::name(&mut col, pages, content, NAME);
        col.gap(DESCRIPTION_GAP);
        sections::contact_line(&mut col, pages, content);
        col.gap(HEADER_GAP / 2.0);
        sections::divider(&mut col, pages);
        col.gap(HEADER_GAP / 2.0);

        sections::work_experience(&mut col, pages, &content.work_experience);
        sections::education(&mut col, pages, &content.education);
        sections::skills_chips(&mut col, pages, &content.skills);
        sections::projects(&mut col, pages, &content.projects);
    }
}

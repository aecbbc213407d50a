//! Two-column variants: a shaded left sidebar (identity, contact, skills) and
//! a wide right column (experience, education, projects).

use crate::content::ResumeContent;
use crate::render::flow::{Column, PageSet};
use crate::render::model::{Element, ImageShape, PageSize};
use crate::render::templates::{sections, Template, TemplateVariant};
use crate::render::theme::{
    COLUMN_GAP, DESCRIPTION_GAP, HEADER_GAP, PAGE_MARGIN, PROFILE_DIAMETER, SIDEBAR_FILL,
    SIDEBAR_NAME, SIDEBAR_PAD, SIDEBAR_WIDTH,
};

pub struct SidebarTemplate;

/// Sidebar plus the circular profile image (top of the left column) and the
/// summary (top of the right column), each only when present.
pub struct SidebarWithProfileTemplate;

impl Template for SidebarTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Sidebar
    }

    fn background(&self, size: PageSize) -> Vec<Element> {
        sidebar_background(size)
    }

    fn layout(&self, content: &ResumeContent, pages: &mut PageSet) {
        layout(content, pages, false);
    }
}

impl Template for SidebarWithProfileTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::SidebarWithProfile
    }

    fn background(&self, size: PageSize) -> Vec<Element> {
        sidebar_background(size)
    }

    fn layout(&self, content: &ResumeContent, pages: &mut PageSet) {
        layout(content, pages, true);
    }
}

fn sidebar_background(size: PageSize) -> Vec<Element> {
    vec![Element::Rect {
        x: 0.0,
        y: 0.0,
        width: SIDEBAR_WIDTH,
        height: size.height,
        fill: SIDEBAR_FILL,
        corner_radius: 0.0,
    }]
}

fn layout(content: &ResumeContent, pages: &mut PageSet, with_profile: bool) {
    let size = pages.size();
    let bottom = size.height - PAGE_MARGIN;

    let mut left = Column::new(
        SIDEBAR_PAD,
        SIDEBAR_WIDTH - 2.0 * SIDEBAR_PAD,
        PAGE_MARGIN,
        PAGE_MARGIN,
        bottom,
    );
    let right_x = SIDEBAR_WIDTH + COLUMN_GAP;
    let mut right = Column::new(
        right_x,
        size.width - right_x - PAGE_MARGIN,
        PAGE_MARGIN,
        PAGE_MARGIN,
        bottom,
    );

    let details = &content.personal_details;
    if with_profile {
        if let Some(source) = details.profile_picture.as_deref() {
            let (page, top) = left.reserve(PROFILE_DIAMETER);
            pages.push(
                page,
                Element::Image {
                    x: left.x() + (left.width() - PROFILE_DIAMETER) / 2.0,
                    y: top,
                    width: PROFILE_DIAMETER,
                    height: PROFILE_DIAMETER,
                    shape: ImageShape::Circle,
                    source: source.to_string(),
                },
            );
            left.gap(HEADER_GAP);
        }
    }

    sections::name(&mut left, pages, content, SIDEBAR_NAME);
    left.gap(DESCRIPTION_GAP);
    sections::contact_stack(&mut left, pages, content);
    left.gap(HEADER_GAP);
    sections::skills_list(&mut left, pages, &content.skills);

    if with_profile {
        sections::summary(&mut right, pages, details.summary.as_deref());
    }
    sections::work_experience(&mut right, pages, &content.work_experience);
    sections::education(&mut right, pages, &content.education);
    sections::projects(&mut right, pages, &content.projects);
}

//! Section builders shared by the template variants.
//!
//! Every builder is a no-op when its data is empty or absent, so templates
//! never emit a heading without content under it.

use crate::content::{
    EducationEntry, OrderedSkillSet, ProjectEntry, ResumeContent, WorkExperienceEntry,
};
use crate::render::flow::{Column, PageSet};
use crate::render::font_metrics::measure;
use crate::render::model::Element;
use crate::render::theme::{
    TextStyle, BODY, CHIP, CHIP_FILL, CHIP_GAP, CHIP_PAD_X, CHIP_PAD_Y, CHIP_RADIUS, CONTACT,
    CONTACT_SEPARATOR, DESCRIPTION_GAP, ENTRY_GAP, ENTRY_TITLE, FRAME, FRAME_THICKNESS,
    HEADING_GAP, META, SECTION_GAP, SECTION_TITLE,
};

/// Joins the non-blank parts with the contact separator.
fn joined(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

pub fn name(col: &mut Column, pages: &mut PageSet, content: &ResumeContent, style: TextStyle) {
    col.text(pages, &content.personal_details.full_name, style);
}

/// All contact fields on one line (wrapping if needed).
pub fn contact_line(col: &mut Column, pages: &mut PageSet, content: &ResumeContent) {
    let line = content.contact_fields().join(CONTACT_SEPARATOR);
    col.text(pages, &line, CONTACT);
}

/// One contact field per line.
pub fn contact_stack(col: &mut Column, pages: &mut PageSet, content: &ResumeContent) {
    for field in content.contact_fields() {
        col.text(pages, field, CONTACT);
    }
}

/// Full-width hairline across the column.
pub fn divider(col: &mut Column, pages: &mut PageSet) {
    let (page, top) = col.reserve(FRAME_THICKNESS);
    let y = top + FRAME_THICKNESS / 2.0;
    pages.push(
        page,
        Element::Rule {
            x1: col.x(),
            y1: y,
            x2: col.x() + col.width(),
            y2: y,
            thickness: FRAME_THICKNESS,
            color: FRAME,
        },
    );
}

fn heading(col: &mut Column, pages: &mut PageSet, title: &str) {
    // Keep the heading on the same page as the first line under it.
    col.keep_together(SECTION_TITLE.line_height() + HEADING_GAP + ENTRY_TITLE.line_height());
    col.text(pages, &title.to_uppercase(), SECTION_TITLE);
    col.gap(HEADING_GAP);
}

pub fn summary(col: &mut Column, pages: &mut PageSet, summary: Option<&str>) {
    let Some(summary) = summary.filter(|s| !s.trim().is_empty()) else {
        return;
    };
    heading(col, pages, "Summary");
    col.paragraphs(pages, summary, BODY);
    col.gap(SECTION_GAP);
}

pub fn work_experience(col: &mut Column, pages: &mut PageSet, entries: &[WorkExperienceEntry]) {
    if entries.is_empty() {
        return;
    }
    heading(col, pages, "Work Experience");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            col.gap(ENTRY_GAP);
        }
        col.keep_together(ENTRY_TITLE.line_height() + META.line_height() * 2.0);
        col.text(pages, &entry.title, ENTRY_TITLE);
        col.text(pages, &joined(&[&entry.company, &entry.location]), META);
        col.text(pages, &entry.date_range(), META);
        if !entry.description.trim().is_empty() {
            col.gap(DESCRIPTION_GAP);
            col.paragraphs(pages, &entry.description, BODY);
        }
    }
    col.gap(SECTION_GAP);
}

pub fn education(col: &mut Column, pages: &mut PageSet, entries: &[EducationEntry]) {
    if entries.is_empty() {
        return;
    }
    heading(col, pages, "Education");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            col.gap(ENTRY_GAP);
        }
        col.keep_together(ENTRY_TITLE.line_height() + META.line_height() * 2.0);
        col.text(pages, &entry.degree, ENTRY_TITLE);
        col.text(pages, &joined(&[&entry.institution, &entry.location]), META);
        col.text(pages, &entry.graduation_year, META);
    }
    col.gap(SECTION_GAP);
}

pub fn projects(col: &mut Column, pages: &mut PageSet, entries: &[ProjectEntry]) {
    if entries.is_empty() {
        return;
    }
    heading(col, pages, "Projects");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            col.gap(ENTRY_GAP);
        }
        col.keep_together(ENTRY_TITLE.line_height() + BODY.line_height());
        col.text(pages, &entry.title, ENTRY_TITLE);
        col.paragraphs(pages, &entry.description, BODY);
        if !entry.technologies.is_empty() {
            col.text(
                pages,
                &format!("Technologies: {}", entry.technologies_line()),
                META,
            );
        }
        if let Some(link) = entry.link.as_deref().filter(|l| !l.trim().is_empty()) {
            col.text(pages, &format!("Link: {link}"), CONTACT);
        }
    }
    col.gap(SECTION_GAP);
}

/// Skills as one line each.
pub fn skills_list(col: &mut Column, pages: &mut PageSet, skills: &OrderedSkillSet) {
    if skills.is_empty() {
        return;
    }
    heading(col, pages, "Skills");
    for skill in skills.iter() {
        col.text(pages, skill, BODY);
    }
    col.gap(SECTION_GAP);
}

/// Skills as filled rounded boxes flowing left to right, wrapping by row.
pub fn skills_chips(col: &mut Column, pages: &mut PageSet, skills: &OrderedSkillSet) {
    if skills.is_empty() {
        return;
    }
    heading(col, pages, "Skills");

    let mut row: Vec<(&str, f32)> = Vec::new();
    let mut row_width = 0.0_f32;
    for skill in skills.iter() {
        let width = (measure(skill, CHIP.font, CHIP.size) + 2.0 * CHIP_PAD_X).min(col.width());
        if !row.is_empty() && row_width + CHIP_GAP + width > col.width() {
            chip_row(col, pages, &row);
            col.gap(CHIP_GAP);
            row.clear();
            row_width = 0.0;
        }
        if !row.is_empty() {
            row_width += CHIP_GAP;
        }
        row_width += width;
        row.push((skill, width));
    }
    chip_row(col, pages, &row);
    col.gap(SECTION_GAP);
}

fn chip_row(col: &mut Column, pages: &mut PageSet, row: &[(&str, f32)]) {
    if row.is_empty() {
        return;
    }
    let height = CHIP.line_height() + 2.0 * CHIP_PAD_Y;
    let (page, top) = col.reserve(height);
    let mut x = col.x();
    for (skill, width) in row {
        pages.push(
            page,
            Element::Rect {
                x,
                y: top,
                width: *width,
                height,
                fill: CHIP_FILL,
                corner_radius: CHIP_RADIUS,
            },
        );
        pages.push(
            page,
            Element::Text {
                x: x + CHIP_PAD_X,
                y: top + CHIP_PAD_Y + CHIP.baseline(),
                text: (*skill).to_string(),
                font: CHIP.font,
                size: CHIP.size,
                color: CHIP.color,
            },
        );
        x += width + CHIP_GAP;
    }
}

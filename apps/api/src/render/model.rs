//! Page-structured output of the template engine.
//!
//! Coordinates are PDF points with a top-left origin; `y` grows downwards.
//! Text `y` is the baseline.

use serde::Serialize;

use crate::render::font_metrics::Font;
use crate::render::TemplateVariant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn gray(level: u8) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Components in 0.0..=1.0 for PDF colour operators.
    pub fn components(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageShape {
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    #[serde(rename_all = "camelCase")]
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Color,
        corner_radius: f32,
    },
    #[serde(rename_all = "camelCase")]
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Color,
    },
    /// `source` is the document's inline image string, passed through untouched.
    #[serde(rename_all = "camelCase")]
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shape: ImageShape,
        source: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: u32,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub variant: TemplateVariant,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

#[cfg(test)]
impl RenderedDocument {
    /// Every text run in drawing order, across all pages.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().any(|t| t.contains(needle))
    }

    pub fn images(&self) -> impl Iterator<Item = &Element> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter(|e| matches!(e, Element::Image { .. }))
    }
}

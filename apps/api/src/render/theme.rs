//! Shared visual constants. All measurements in points.

use crate::render::font_metrics::Font;
use crate::render::model::Color;

/// Line box height as a multiple of the font size.
const LINE_SPACING: f32 = 1.3;
/// Helvetica ascender, in em.
const ASCENT: f32 = 0.718;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    const fn new(font: Font, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }

    /// Baseline offset from the top of the line box.
    pub fn baseline(&self) -> f32 {
        self.size * (LINE_SPACING - 1.0) / 2.0 + self.size * ASCENT
    }
}

pub const INK: Color = Color::gray(0x00);
pub const MUTED: Color = Color::gray(0x66);
pub const HEADING: Color = Color::gray(0x33);
pub const CHIP_FILL: Color = Color::gray(0xF0);
pub const SIDEBAR_FILL: Color = Color::rgb(0xF3, 0xF4, 0xF6);
pub const FRAME: Color = Color::gray(0xCC);

pub const NAME: TextStyle = TextStyle::new(Font::Bold, 24.0, INK);
pub const SIDEBAR_NAME: TextStyle = TextStyle::new(Font::Bold, 18.0, INK);
pub const CONTACT: TextStyle = TextStyle::new(Font::Regular, 10.0, MUTED);
pub const SECTION_TITLE: TextStyle = TextStyle::new(Font::Bold, 14.0, HEADING);
pub const ENTRY_TITLE: TextStyle = TextStyle::new(Font::Bold, 12.0, INK);
pub const META: TextStyle = TextStyle::new(Font::Regular, 10.0, MUTED);
pub const BODY: TextStyle = TextStyle::new(Font::Regular, 10.0, INK);
pub const CHIP: TextStyle = TextStyle::new(Font::Regular, 10.0, INK);

pub const PAGE_MARGIN: f32 = 30.0;
pub const HEADER_GAP: f32 = 20.0;
pub const SECTION_GAP: f32 = 20.0;
pub const HEADING_GAP: f32 = 10.0;
pub const ENTRY_GAP: f32 = 10.0;
pub const DESCRIPTION_GAP: f32 = 5.0;

pub const CHIP_PAD_X: f32 = 8.0;
pub const CHIP_PAD_Y: f32 = 4.0;
pub const CHIP_RADIUS: f32 = 4.0;
pub const CHIP_GAP: f32 = 5.0;

pub const SIDEBAR_WIDTH: f32 = 190.0;
pub const SIDEBAR_PAD: f32 = 20.0;
pub const COLUMN_GAP: f32 = 20.0;
pub const PROFILE_DIAMETER: f32 = 96.0;
pub const FRAME_THICKNESS: f32 = 1.0;

/// Separator between contact fields on a single line.
pub const CONTACT_SEPARATOR: &str = " \u{2022} ";

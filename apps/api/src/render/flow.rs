//! Flow cursor and page bookkeeping.
//!
//! Content is placed top-down; a column moves to the next page when the next
//! box does not fit above its bottom edge. Each column flows independently,
//! so two-column layouts can end on different pages. Pages are created on
//! demand and start with a copy of the background elements.

use crate::render::font_metrics::wrap;
use crate::render::model::{Element, Page, PageSize};
use crate::render::theme::TextStyle;

pub struct PageSet {
    size: PageSize,
    background: Vec<Element>,
    pages: Vec<Vec<Element>>,
}

impl PageSet {
    pub fn new(size: PageSize, background: Vec<Element>) -> Self {
        let mut set = Self {
            size,
            background,
            pages: Vec::new(),
        };
        set.ensure(0);
        set
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    fn ensure(&mut self, index: usize) {
        while self.pages.len() <= index {
            self.pages.push(self.background.clone());
        }
    }

    pub fn push(&mut self, page: usize, element: Element) {
        self.ensure(page);
        self.pages[page].push(element);
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
            .into_iter()
            .enumerate()
            .map(|(i, elements)| Page {
                number: i as u32 + 1,
                elements,
            })
            .collect()
    }
}

/// A vertical strip of a page with its own flow cursor.
pub struct Column {
    x: f32,
    width: f32,
    /// Where content starts on continuation pages.
    top: f32,
    bottom: f32,
    page: usize,
    cursor: f32,
}

impl Column {
    pub fn new(x: f32, width: f32, start: f32, top: f32, bottom: f32) -> Self {
        Self {
            x,
            width,
            top,
            bottom,
            page: 0,
            cursor: start,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    fn breaks_for(&self, height: f32) -> bool {
        self.cursor + height > self.bottom && self.cursor > self.top
    }

    fn next_page(&mut self) {
        self.page += 1;
        self.cursor = self.top;
    }

    /// Claims `height` points of the column. Returns `(page, top)` of the box.
    /// A box taller than a whole page is placed anyway, overflowing the bottom.
    pub fn reserve(&mut self, height: f32) -> (usize, f32) {
        if self.breaks_for(height) {
            self.next_page();
        }
        let top = self.cursor;
        self.cursor += height;
        (self.page, top)
    }

    /// Starts a new page now unless `height` still fits on this one.
    pub fn keep_together(&mut self, height: f32) {
        if self.breaks_for(height) {
            self.next_page();
        }
    }

    /// Vertical whitespace. Never starts a page on its own.
    pub fn gap(&mut self, height: f32) {
        self.cursor += height;
    }

    /// Wraps `text` to the column width and places one line box per line.
    /// Returns the number of lines placed.
    pub fn text(&mut self, pages: &mut PageSet, text: &str, style: TextStyle) -> usize {
        let lines = wrap(text, style.font, style.size, self.width);
        let count = lines.len();
        for line in lines {
            let (page, top) = self.reserve(style.line_height());
            pages.push(
                page,
                Element::Text {
                    x: self.x,
                    y: top + style.baseline(),
                    text: line,
                    font: style.font,
                    size: style.size,
                    color: style.color,
                },
            );
        }
        count
    }

    /// Like [`Column::text`], but each newline-separated paragraph wraps on its own.
    pub fn paragraphs(&mut self, pages: &mut PageSet, text: &str, style: TextStyle) -> usize {
        text.lines()
            .map(|paragraph| self.text(pages, paragraph, style))
            .sum()
    }
}

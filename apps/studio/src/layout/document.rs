//! The page plan produced by the layout engine and consumed by the PDF writer.
//!
//! All coordinates are in points measured from the top-left corner of the page.

use serde::Serialize;

use crate::layout::encoding::EncodingWarning;
use crate::layout::font_metrics::{FontFace, FontFamily};

/// What a text run is on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunRole {
    Name,
    JobTitle,
    Contact,
    SectionTitle,
    Body,
    ExperienceHeading,
    ExperienceDates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub face: FontFace,
    pub size_pt: f32,
    /// Fill gray level, 0 = black, 255 = white.
    pub gray: u8,
    pub text: String,
    pub role: RunRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawItem {
    Text(TextRun),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: u8,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        line_width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPage {
    pub items: Vec<DrawItem>,
}

impl LayoutPage {
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Text(run) => Some(run),
            _ => None,
        })
    }
}

/// A fully positioned resume, one entry per page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDocument {
    pub page_width: f32,
    pub page_height: f32,
    pub family: FontFamily,
    pub title: String,
    pub pages: Vec<LayoutPage>,
    pub warnings: Vec<EncodingWarning>,
}

impl LayoutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run with its zero-based page index, in placement order.
    pub fn runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.runs().map(move |run| (i, run)))
    }
}

#[cfg(test)]
impl LayoutDocument {
    /// Text of every run with the given role, in placement order.
    pub fn texts_with_role(&self, role: RunRole) -> Vec<&str> {
        self.runs()
            .filter(|(_, run)| run.role == role)
            .map(|(_, run)| run.text.as_str())
            .collect()
    }

    /// Plain text of the document: one run per line, pages separated by a form feed.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                page.runs()
                    .map(|run| run.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\u{c}")
    }

    /// Body-level runs placed under the section title `title`, up to the next title.
    pub fn section_body(&self, title: &str) -> Vec<&str> {
        let mut inside = false;
        let mut out = Vec::new();
        for (_, run) in self.runs() {
            match run.role {
                RunRole::SectionTitle => inside = run.text == title,
                RunRole::Body | RunRole::ExperienceHeading | RunRole::ExperienceDates if inside => {
                    out.push(run.text.as_str())
                }
                _ => {}
            }
        }
        out
    }
}

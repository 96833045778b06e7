//! Resume layout engine: turns a `ResumeRecord` into a positioned page plan.
//!
//! # Page structure (top to bottom)
//! - Header band: name (Bold 26pt), job title (Italic 14pt, muted gray)
//! - Contact band: `email | phone | location | profile`, ruled underneath
//! - Conditional sections in fixed order: summary, experience, education, skills
//!
//! # Page breaks
//! A line that would cross `PageConfig::break_trigger_pt` moves to a new page.
//! A section title band is placed together with its gap and first body line,
//! so a title never ends a page on its own.

use tracing::{debug, warn};

use crate::layout::document::{DrawItem, LayoutDocument, LayoutPage, RunRole, TextRun};
use crate::layout::encoding::{sanitize, EncodingWarning};
use crate::layout::font_metrics::{get_metrics, FontFace, FontMetricTable};
use crate::layout::page::{PageConfig, MM};
use crate::layout::wrap::wrap_text;
use crate::layout::LayoutError;
use crate::models::resume::{ExperienceEntry, ResumeRecord, Section};

// Band heights and gaps are in millimetres, font sizes in points.
const NAME_SIZE: f32 = 26.0;
const NAME_BAND_MM: f32 = 10.0;
const JOB_TITLE_SIZE: f32 = 14.0;
const JOB_TITLE_BAND_MM: f32 = 8.0;
const MUTED_GRAY: u8 = 100;
const CONTACT_SIZE: f32 = 10.0;
const CONTACT_BAND_MM: f32 = 8.0;
const CONTACT_RULE_MM: f32 = 0.2;
const AFTER_CONTACT_MM: f32 = 5.0;

const SECTION_TITLE_SIZE: f32 = 12.0;
const SECTION_BAND_MM: f32 = 8.0;
const SECTION_FILL_GRAY: u8 = 230;
const AFTER_TITLE_MM: f32 = 2.0;
const BODY_SIZE: f32 = 11.0;
const BODY_LINE_MM: f32 = 5.0;
const AFTER_SECTION_MM: f32 = 5.0;
const EXPERIENCE_HEADING_MM: f32 = 6.0;

const CELL_PADDING_MM: f32 = 1.0;
const ELLIPSIS: &str = "...";
const BLACK: u8 = 0;

/// Lays out resumes on a validated page geometry.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: PageConfig,
}

impl LayoutEngine {
    /// Initializes the engine. Fails when the page geometry cannot hold the fixed bands.
    pub fn new(config: PageConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Produces the page plan for one record. Never rejects a record: blank fields
    /// render as blank lines and unsupported characters are substituted.
    pub fn layout(&self, record: &ResumeRecord) -> LayoutDocument {
        let mut warnings = Vec::new();
        let mut cursor = PageCursor::new(&self.config);

        self.place_header(&mut cursor, record, &mut warnings);

        for section in record.sections() {
            match section {
                Section::Summary => {
                    self.place_text_section(&mut cursor, section, &record.summary, "summary", &mut warnings)
                }
                Section::Experience => {
                    self.place_experience(&mut cursor, &record.experience, &mut warnings)
                }
                Section::Education => self.place_text_section(
                    &mut cursor,
                    section,
                    &record.education.body(),
                    "education",
                    &mut warnings,
                ),
                Section::Skills => {
                    self.place_text_section(&mut cursor, section, &record.skills, "skills", &mut warnings)
                }
            }
        }

        if !warnings.is_empty() {
            warn!(
                substitutions = warnings.len(),
                "Replaced characters the resume typeface cannot encode"
            );
        }

        let name = record.name.trim();
        let title = if name.is_empty() {
            "Resume".to_string()
        } else {
            let mut scratch = Vec::new();
            format!("{} Resume", sanitize(name, "name", &mut scratch))
        };

        let pages = cursor.finish();
        debug!(pages = pages.len(), "Resume layout complete");

        LayoutDocument {
            page_width: self.config.page_width_pt(),
            page_height: self.config.page_height_pt(),
            family: self.config.family,
            title,
            pages,
            warnings,
        }
    }

    // ── bands ────────────────────────────────────────────────────────────────

    fn place_header(
        &self,
        cursor: &mut PageCursor<'_>,
        record: &ResumeRecord,
        warnings: &mut Vec<EncodingWarning>,
    ) {
        let inner_width = self.config.text_width_pt() - 2.0 * CELL_PADDING_MM * MM;

        let name = sanitize(record.name.trim(), "name", warnings);
        let name = truncate_to_width(&name, self.metrics(FontFace::Bold), NAME_SIZE, inner_width);
        self.single_line_band(cursor, name, FontFace::Bold, NAME_SIZE, BLACK, NAME_BAND_MM, RunRole::Name);

        let job_title = sanitize(record.job_title.trim(), "job_title", warnings);
        let job_title =
            truncate_to_width(&job_title, self.metrics(FontFace::Italic), JOB_TITLE_SIZE, inner_width);
        self.single_line_band(
            cursor,
            job_title,
            FontFace::Italic,
            JOB_TITLE_SIZE,
            MUTED_GRAY,
            JOB_TITLE_BAND_MM,
            RunRole::JobTitle,
        );

        let contact = sanitize(&record.contact_line(), "contact", warnings);
        let contact =
            truncate_to_width(&contact, self.metrics(FontFace::Regular), CONTACT_SIZE, inner_width);
        let rule_y = cursor.y + CONTACT_BAND_MM * MM;
        self.single_line_band(
            cursor,
            contact,
            FontFace::Regular,
            CONTACT_SIZE,
            BLACK,
            CONTACT_BAND_MM,
            RunRole::Contact,
        );
        cursor.push(DrawItem::Rule {
            x1: self.config.left_pt(),
            x2: self.config.right_pt(),
            y: rule_y,
            line_width: CONTACT_RULE_MM * MM,
        });
        cursor.advance(AFTER_CONTACT_MM * MM);
    }

    /// Summary, education and skills share this layout: title band, gap, wrapped body.
    fn place_text_section(
        &self,
        cursor: &mut PageCursor<'_>,
        section: Section,
        text: &str,
        field: &'static str,
        warnings: &mut Vec<EncodingWarning>,
    ) {
        let body = sanitize(text.trim(), field, warnings);
        let lines = self.wrap_body(&body);

        cursor.reserve((SECTION_BAND_MM + AFTER_TITLE_MM + BODY_LINE_MM) * MM);
        self.title_band(cursor, section.title());
        for line in lines {
            self.body_line(cursor, line);
        }
        cursor.advance(AFTER_SECTION_MM * MM);
    }

    /// Experience: title band, then role/company left and dates right on one line,
    /// then the wrapped description.
    fn place_experience(
        &self,
        cursor: &mut PageCursor<'_>,
        experience: &ExperienceEntry,
        warnings: &mut Vec<EncodingWarning>,
    ) {
        let padding = CELL_PADDING_MM * MM;
        let bold = self.metrics(FontFace::Bold);
        let italic = self.metrics(FontFace::Italic);

        let dates = experience
            .date_range()
            .map(|d| sanitize(&d, "experience.dates", warnings));
        let dates_width = dates
            .as_deref()
            .map(|d| italic.width_pt(d, BODY_SIZE))
            .unwrap_or(0.0);

        let heading = sanitize(&experience.heading(), "experience.role", warnings);
        let heading_room = match dates {
            Some(_) => self.config.text_width_pt() - dates_width - 4.0 * padding,
            None => self.config.text_width_pt() - 2.0 * padding,
        };
        let heading = truncate_to_width(&heading, bold, BODY_SIZE, heading_room.max(0.0));

        let description = sanitize(experience.description.trim(), "experience.description", warnings);
        let lines = self.wrap_body(&description);

        // Keep the heading with the first description line as well as the title.
        let first_line_mm = if lines.is_empty() { 0.0 } else { BODY_LINE_MM };
        cursor.reserve((SECTION_BAND_MM + AFTER_TITLE_MM + EXPERIENCE_HEADING_MM + first_line_mm) * MM);
        self.title_band(cursor, Section::Experience.title());

        let band = EXPERIENCE_HEADING_MM * MM;
        let baseline = cursor.baseline(band, BODY_SIZE);
        cursor.push_text(TextRun {
            x: self.config.left_pt() + padding,
            baseline,
            face: FontFace::Bold,
            size_pt: BODY_SIZE,
            gray: BLACK,
            text: heading,
            role: RunRole::ExperienceHeading,
        });
        if let Some(dates) = dates {
            cursor.push_text(TextRun {
                x: self.config.right_pt() - padding - dates_width,
                baseline,
                face: FontFace::Italic,
                size_pt: BODY_SIZE,
                gray: BLACK,
                text: dates,
                role: RunRole::ExperienceDates,
            });
        }
        cursor.advance(band);

        for line in lines {
            self.body_line(cursor, line);
        }
        cursor.advance(AFTER_SECTION_MM * MM);
    }

    fn title_band(&self, cursor: &mut PageCursor<'_>, title: &str) {
        let band = SECTION_BAND_MM * MM;
        cursor.push(DrawItem::FillRect {
            x: self.config.left_pt(),
            y: cursor.y,
            width: self.config.text_width_pt(),
            height: band,
            gray: SECTION_FILL_GRAY,
        });
        cursor.push_text(TextRun {
            x: self.config.left_pt() + CELL_PADDING_MM * MM,
            baseline: cursor.baseline(band, SECTION_TITLE_SIZE),
            face: FontFace::Bold,
            size_pt: SECTION_TITLE_SIZE,
            gray: BLACK,
            text: title.to_uppercase(),
            role: RunRole::SectionTitle,
        });
        cursor.advance(band);
        cursor.advance(AFTER_TITLE_MM * MM);
    }

    fn body_line(&self, cursor: &mut PageCursor<'_>, line: String) {
        let height = BODY_LINE_MM * MM;
        cursor.reserve(height);
        cursor.push_text(TextRun {
            x: self.config.left_pt() + CELL_PADDING_MM * MM,
            baseline: cursor.baseline(height, BODY_SIZE),
            face: FontFace::Regular,
            size_pt: BODY_SIZE,
            gray: BLACK,
            text: line,
            role: RunRole::Body,
        });
        cursor.advance(height);
    }

    #[allow(clippy::too_many_arguments)]
    fn single_line_band(
        &self,
        cursor: &mut PageCursor<'_>,
        text: String,
        face: FontFace,
        size_pt: f32,
        gray: u8,
        band_mm: f32,
        role: RunRole,
    ) {
        let band = band_mm * MM;
        cursor.reserve(band);
        cursor.push_text(TextRun {
            x: self.config.left_pt() + CELL_PADDING_MM * MM,
            baseline: cursor.baseline(band, size_pt),
            face,
            size_pt,
            gray,
            text,
            role,
        });
        cursor.advance(band);
    }

    fn wrap_body(&self, text: &str) -> Vec<String> {
        let width = self.config.text_width_pt() - 2.0 * CELL_PADDING_MM * MM;
        wrap_text(text, self.metrics(FontFace::Regular), BODY_SIZE, width)
    }

    fn metrics(&self, face: FontFace) -> &'static FontMetricTable {
        get_metrics(self.config.family, face)
    }
}

/// Shortens `text` with a trailing "..." until it fits `max_width_pt`.
fn truncate_to_width(text: &str, metrics: &FontMetricTable, size_pt: f32, max_width_pt: f32) -> String {
    if metrics.width_pt(text, size_pt) <= max_width_pt {
        return text.to_string();
    }
    let ellipsis_w = metrics.width_pt(ELLIPSIS, size_pt);
    let mut kept = String::new();
    let mut width = 0.0_f32;
    for c in text.chars() {
        let w = metrics.char_width(c) * size_pt;
        if width + w + ellipsis_w > max_width_pt {
            break;
        }
        kept.push(c);
        width += w;
    }
    format!("{}{ELLIPSIS}", kept.trim_end())
}

// ────────────────────────────────────────────────────────────────────────────
// Page cursor
// ────────────────────────────────────────────────────────────────────────────

/// Vertical write position plus the pages filled so far.
struct PageCursor<'a> {
    config: &'a PageConfig,
    pages: Vec<LayoutPage>,
    y: f32,
    /// True until something is drawn on the current page.
    fresh: bool,
}

impl<'a> PageCursor<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![LayoutPage::default()],
            y: config.top_pt(),
            fresh: true,
        }
    }

    /// Starts a new page unless `height` still fits above the break trigger.
    /// A fresh page always accepts content, so oversized units cannot loop.
    fn reserve(&mut self, height: f32) {
        if !self.fresh && self.y + height > self.config.break_trigger_pt() {
            self.pages.push(LayoutPage::default());
            self.y = self.config.top_pt();
            self.fresh = true;
        }
    }

    fn advance(&mut self, height: f32) {
        self.y += height;
    }

    /// Baseline for text vertically centred in a band starting at the cursor.
    fn baseline(&self, band_height: f32, size_pt: f32) -> f32 {
        self.y + band_height / 2.0 + 0.3 * size_pt
    }

    fn push(&mut self, item: DrawItem) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
        self.fresh = false;
    }

    /// Empty runs reserve their band but draw nothing.
    fn push_text(&mut self, run: TextRun) {
        if run.text.is_empty() {
            self.fresh = false;
            return;
        }
        self.push(DrawItem::Text(run));
    }

    fn finish(self) -> Vec<LayoutPage> {
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

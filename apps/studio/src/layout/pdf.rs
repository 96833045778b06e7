//! Serializes a `LayoutDocument` into PDF bytes with `pdf-writer`.
//!
//! Fonts are the standard Type1 faces with WinAnsi encoding, so nothing is
//! embedded. Content streams are left uncompressed and no timestamps are
//! written, which makes the output byte-for-byte reproducible.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::document::{DrawItem, LayoutDocument, TextRun};
use crate::layout::encoding::to_winansi_bytes;
use crate::layout::font_metrics::{base_font_name, FontFace};

const PRODUCER: &str = "studio resume builder";

/// Writes the page plan as a PDF document.
pub fn write_pdf(doc: &LayoutDocument) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<(FontFace, Ref)> = FontFace::ALL.iter().map(|face| (*face, alloc())).collect();
    let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc(), alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .producer(TextStr(PRODUCER));

    for (face, font_id) in &font_ids {
        pdf.type1_font(*font_id)
            .base_font(Name(base_font_name(doc.family, *face).as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        {
            let mut pdf_page = pdf.page(*page_id);
            pdf_page
                .media_box(Rect::new(0.0, 0.0, doc.page_width, doc.page_height))
                .parent(pages_id)
                .contents(*content_id);
            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            for (face, font_id) in &font_ids {
                fonts.pair(Name(face.resource_name().as_bytes()), *font_id);
            }
        }

        let mut content = Content::new();
        for item in &page.items {
            draw_item(&mut content, item, doc.page_height);
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

/// Emits one item. Layout coordinates grow downwards; PDF user space grows upwards.
fn draw_item(content: &mut Content, item: &DrawItem, page_height: f32) {
    match item {
        DrawItem::FillRect {
            x,
            y,
            width,
            height,
            gray,
        } => {
            content.set_fill_gray(gray_level(*gray));
            content.rect(*x, page_height - y - height, *width, *height);
            content.fill_nonzero();
        }
        DrawItem::Rule {
            x1,
            x2,
            y,
            line_width,
        } => {
            content.set_stroke_gray(0.0);
            content.set_line_width(*line_width);
            content.move_to(*x1, page_height - y);
            content.line_to(*x2, page_height - y);
            content.stroke();
        }
        DrawItem::Text(run) => draw_text(content, run, page_height),
    }
}

fn draw_text(content: &mut Content, run: &TextRun, page_height: f32) {
    let bytes = to_winansi_bytes(&run.text);
    content.set_fill_gray(gray_level(run.gray));
    content
        .begin_text()
        .set_font(Name(run.face.resource_name().as_bytes()), run.size_pt)
        .next_line(run.x, page_height - run.baseline)
        .show(Str(&bytes))
        .end_text();
}

fn gray_level(gray: u8) -> f32 {
    gray as f32 / 255.0
}

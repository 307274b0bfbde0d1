use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::fonts::to_winansi_bytes;
use crate::model::{DrawCommand, FontWeight, Page, PageGeometry};

// Cell borders and other stroked rects share one hairline weight
const STROKE_WIDTH: f32 = 0.5;

const BASE_FONTS: [(&[u8], &[u8]); 4] = [
    (b"F1", b"Helvetica"),
    (b"F2", b"Helvetica-Bold"),
    (b"F3", b"Helvetica-Oblique"),
    (b"F4", b"Courier"),
];

fn font_name(weight: FontWeight) -> Name<'static> {
    match weight {
        FontWeight::Regular => Name(b"F1"),
        FontWeight::Bold => Name(b"F2"),
        FontWeight::Italic => Name(b"F3"),
        FontWeight::Mono => Name(b"F4"),
    }
}

/// Serialize finalized pages into a PDF document. The draw-command
/// vocabulary maps 1:1 onto content-stream operators; the four output faces
/// are Type1 base fonts with WinAnsi encoding, registered once and never
/// embedded.
pub fn serialize(pages: &[Page], geom: PageGeometry) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let mut font_refs: Vec<Ref> = Vec::with_capacity(BASE_FONTS.len());
    for (_, base) in BASE_FONTS {
        let font_ref = alloc();
        pdf.type1_font(font_ref)
            .base_font(Name(base))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        font_refs.push(font_ref);
    }

    let page_ids: Vec<Ref> = (0..pages.len()).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..pages.len()).map(|_| alloc()).collect();

    for (i, page) in pages.iter().enumerate() {
        let raw = render_page(page, geom).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    for i in 0..pages.len() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geom.page_width, geom.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for ((name, _), font_ref) in BASE_FONTS.iter().zip(&font_refs) {
            fonts.pair(Name(name), *font_ref);
        }
    }

    pdf.finish()
}

/// Build one page's content stream, flipping the engine's top-left-origin
/// coordinates to PDF's bottom-left origin.
fn render_page(page: &Page, geom: PageGeometry) -> Content {
    let mut content = Content::new();
    let flip = |y: f32| geom.page_height - y;

    // Fill color and font persist across text commands; rect/line state is
    // isolated with save/restore and never leaks into text state.
    let mut text_fill: Option<[u8; 3]> = None;
    let mut text_font: Option<(FontWeight, f32)> = None;

    for cmd in &page.commands {
        match cmd {
            DrawCommand::Text {
                x,
                y,
                content: text,
                font_size,
                weight,
                color,
            } => {
                if text_fill != Some(*color) {
                    let [r, g, b] = *color;
                    content.set_fill_rgb(
                        r as f32 / 255.0,
                        g as f32 / 255.0,
                        b as f32 / 255.0,
                    );
                    text_fill = Some(*color);
                }
                content.begin_text();
                if text_font != Some((*weight, *font_size)) {
                    content.set_font(font_name(*weight), *font_size);
                    text_font = Some((*weight, *font_size));
                }
                content.next_line(*x, flip(*y));
                content.show(Str(&to_winansi_bytes(text)));
                content.end_text();
            }
            DrawCommand::FilledRect { x, y, w, h, color } => {
                let [r, g, b] = *color;
                content.save_state();
                content.set_fill_rgb(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                );
                content.rect(*x, flip(*y) - *h, *w, *h);
                content.fill_nonzero();
                content.restore_state();
            }
            DrawCommand::StrokedRect { x, y, w, h, color } => {
                let [r, g, b] = *color;
                content.save_state();
                content.set_line_width(STROKE_WIDTH);
                content.set_stroke_rgb(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                );
                content.rect(*x, flip(*y) - *h, *w, *h);
                content.stroke();
                content.restore_state();
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                let [r, g, b] = *color;
                content.save_state();
                content.set_line_width(*width);
                content.set_stroke_rgb(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                );
                content.move_to(*x1, flip(*y1));
                content.line_to(*x2, flip(*y2));
                content.stroke();
                content.restore_state();
            }
        }
    }
    content
}

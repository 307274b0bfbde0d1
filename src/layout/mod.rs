mod table;

use crate::fonts::wrap_text;
use crate::model::{Block, DrawCommand, FontWeight, Page, PageGeometry};
use crate::style::StyleProfile;

/// Space above the bottom margin reserved for the footer stamps.
pub const FOOTER_BAND: f32 = 18.0;

// Baseline offset within a line, as a fraction of the font size
const ASCENDER: f32 = 0.75;

const BLOCK_GAP: f32 = 8.0;
const LIST_INDENT_STEP: f32 = 18.0;
const MARKER_COLUMN: f32 = 18.0;
const CODE_PAD: f32 = 6.0;
const QUOTE_BAR_WIDTH: f32 = 3.0;
const QUOTE_PAD: f32 = 8.0;
const QUOTE_VPAD: f32 = 4.0;
pub(crate) const CELL_PAD: f32 = 6.0;
const RULE_SPACING: f32 = 6.0;
const RULE_WIDTH: f32 = 1.0;
const HEADING_LEAD_MAJOR: f32 = 8.0;
const HEADING_LEAD_MINOR: f32 = 4.0;
const HEADING_RULE_GAP: f32 = 4.0;
const FOOTER_SIZE: f32 = 8.0;
const FOOTER_RISE: f32 = 4.0; // baseline sits this far above the margin line

pub fn paginate(blocks: &[Block], style: &StyleProfile, geom: PageGeometry) -> Vec<Page> {
    let mut p = Paginator::new(style, geom);
    for block in blocks {
        match block {
            Block::Heading { level, text } => p.place_heading(*level, text),
            Block::Paragraph { text } => p.place_paragraph(text),
            Block::ListItem {
                text,
                indent,
                ordered,
                ordinal,
            } => p.place_list_item(text, *indent, *ordered, *ordinal),
            Block::CodeBlock { lines } => p.place_code_block(lines),
            Block::Blockquote { text } => p.place_blockquote(text),
            Block::Table {
                rows,
                has_header_row,
            } => p.place_table(rows, *has_header_row),
            Block::Rule => p.place_rule(),
        }
    }
    p.pages
}

/// Second pass: stamp the export date (left) and "Page i of N" (right) on
/// every page. Appends only; the total is unknown until the layout pass has
/// finished, which is why this cannot be folded into `paginate`.
pub fn finalize_pages(
    mut pages: Vec<Page>,
    style: &StyleProfile,
    geom: PageGeometry,
    date_stamp: &str,
) -> Vec<Page> {
    if pages.is_empty() {
        pages.push(Page::new(0));
    }
    let total = pages.len();
    let baseline = geom.page_height - geom.margin - FOOTER_RISE;

    for page in &mut pages {
        page.commands.push(DrawCommand::Text {
            x: geom.margin,
            y: baseline,
            content: date_stamp.to_string(),
            font_size: FOOTER_SIZE,
            weight: FontWeight::Regular,
            color: style.secondary,
        });
        let label = format!("Page {} of {}", page.index + 1, total);
        let label_w = FontWeight::Regular.text_width(&label, FOOTER_SIZE);
        page.commands.push(DrawCommand::Text {
            x: geom.page_width - geom.margin - label_w,
            y: baseline,
            content: label,
            font_size: FOOTER_SIZE,
            weight: FontWeight::Regular,
            color: style.secondary,
        });
    }
    pages
}

// The cursor works in top-left-origin coordinates: `y` grows downward and
// must stay within [margin, page_height - margin - FOOTER_BAND] before any
// placement. Paragraphs and code blocks split between lines on overflow;
// every other block moves to the next page whole.
pub(crate) struct Paginator<'a> {
    pub(crate) style: &'a StyleProfile,
    pub(crate) geom: PageGeometry,
    pub(crate) pages: Vec<Page>,
    pub(crate) y: f32,
}

impl<'a> Paginator<'a> {
    fn new(style: &'a StyleProfile, geom: PageGeometry) -> Self {
        Self {
            style,
            geom,
            pages: vec![Page::new(0)],
            y: geom.margin,
        }
    }

    pub(crate) fn bottom_limit(&self) -> f32 {
        self.geom.page_height - self.geom.margin - FOOTER_BAND
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.geom.margin + 0.5
    }

    fn break_page(&mut self) {
        let index = self.pages.len();
        self.pages.push(Page::new(index));
        self.y = self.geom.margin;
    }

    /// Page-break unless `needed` fits in the remaining space. At the top of
    /// a fresh page the block is placed regardless: oversized content
    /// overflows rather than looping.
    pub(crate) fn ensure_room(&mut self, needed: f32) {
        if !self.at_page_top() && self.y + needed > self.bottom_limit() {
            self.break_page();
        }
    }

    pub(crate) fn push(&mut self, cmd: DrawCommand) {
        self.pages
            .last_mut()
            .expect("paginator owns at least one page")
            .commands
            .push(cmd);
    }

    fn text_at(&mut self, x: f32, baseline: f32, content: &str, size: f32, weight: FontWeight, color: [u8; 3]) {
        self.push(DrawCommand::Text {
            x,
            y: baseline,
            content: content.to_string(),
            font_size: size,
            weight,
            color,
        });
    }

    /// Fixed gap after a block. Overflow caused by the gap is absorbed by
    /// the next block's fit check, never by moving what was already placed.
    pub(crate) fn finish_block(&mut self) {
        self.y += BLOCK_GAP;
    }

    fn place_heading(&mut self, level: u8, text: &str) {
        let size = self.style.heading_size(level);
        let color = self.style.heading_color(level);
        let lh = self.style.line_advance(size);
        let (lead, rule_width) = if level <= 2 {
            (HEADING_LEAD_MAJOR, 1.5)
        } else {
            (HEADING_LEAD_MINOR, 0.75)
        };

        let lines = wrap_text(text, FontWeight::Bold, size, self.geom.content_width());
        let height = lead + lines.len() as f32 * lh + HEADING_RULE_GAP + rule_width;
        self.ensure_room(height);

        self.y += lead;
        for line in &lines {
            let baseline = self.y + size * ASCENDER;
            self.text_at(self.geom.margin, baseline, line, size, FontWeight::Bold, color);
            self.y += lh;
        }

        self.y += HEADING_RULE_GAP;
        self.push(DrawCommand::Line {
            x1: self.geom.margin,
            y1: self.y,
            x2: self.geom.margin + self.geom.content_width(),
            y2: self.y,
            color,
            width: rule_width,
        });
        self.y += rule_width;
        self.finish_block();
    }

    /// Paragraphs split between lines: each wrapped line is fitted on its
    /// own, so a line is never cut across a page boundary.
    fn place_paragraph(&mut self, text: &str) {
        let size = self.style.body_size;
        let lh = self.style.line_advance(size);
        let lines = wrap_text(text, FontWeight::Regular, size, self.geom.content_width());

        for line in &lines {
            self.ensure_room(lh);
            let baseline = self.y + size * ASCENDER;
            self.text_at(
                self.geom.margin,
                baseline,
                line,
                size,
                FontWeight::Regular,
                self.style.text,
            );
            self.y += lh;
        }
        self.finish_block();
    }

    fn place_list_item(&mut self, text: &str, indent: usize, ordered: bool, ordinal: u32) {
        let size = self.style.body_size;
        let lh = self.style.line_advance(size);
        let marker_x = self.geom.margin + indent as f32 * LIST_INDENT_STEP;
        let text_x = marker_x + MARKER_COLUMN;
        let avail = (self.geom.page_width - self.geom.margin - text_x).max(1.0);

        let lines = wrap_text(text, FontWeight::Regular, size, avail);
        self.ensure_room(lines.len() as f32 * lh);

        let marker = if ordered {
            format!("{ordinal}.")
        } else {
            "\u{2022}".to_string()
        };
        let first_baseline = self.y + size * ASCENDER;
        self.text_at(
            marker_x,
            first_baseline,
            &marker,
            size,
            FontWeight::Regular,
            self.style.secondary,
        );

        // Continuation lines align under the first line's text edge
        for line in &lines {
            let baseline = self.y + size * ASCENDER;
            self.text_at(text_x, baseline, line, size, FontWeight::Regular, self.style.text);
            self.y += lh;
        }
        self.finish_block();
    }

    /// Code splits between source lines; each page's subset gets its own
    /// background rectangle sized to exactly that subset.
    fn place_code_block(&mut self, lines: &[String]) {
        let size = self.style.code_size;
        let lh = self.style.line_advance(size);
        self.ensure_room(2.0 * CODE_PAD + lh);

        let mut remaining = lines;
        while !remaining.is_empty() {
            let avail = self.bottom_limit() - self.y - 2.0 * CODE_PAD;
            let capacity = if avail >= lh {
                (avail / lh) as usize
            } else if self.at_page_top() {
                1 // page too short for even one padded line: overflow, don't loop
            } else {
                self.break_page();
                continue;
            };

            let take = remaining.len().min(capacity);
            let box_h = 2.0 * CODE_PAD + take as f32 * lh;
            self.push(DrawCommand::FilledRect {
                x: self.geom.margin,
                y: self.y,
                w: self.geom.content_width(),
                h: box_h,
                color: self.style.code_background,
            });

            let mut line_top = self.y + CODE_PAD;
            for line in &remaining[..take] {
                self.text_at(
                    self.geom.margin + CODE_PAD,
                    line_top + size * ASCENDER,
                    line,
                    size,
                    FontWeight::Mono,
                    self.style.text,
                );
                line_top += lh;
            }

            self.y += box_h;
            remaining = &remaining[take..];
            if !remaining.is_empty() {
                log::debug!(
                    "CODE split take={} remaining={} page={}",
                    take,
                    remaining.len(),
                    self.pages.len()
                );
                self.break_page();
            }
        }
        self.finish_block();
    }

    fn place_blockquote(&mut self, text: &str) {
        let size = self.style.body_size;
        let lh = self.style.line_advance(size);
        let text_x = self.geom.margin + QUOTE_BAR_WIDTH + QUOTE_PAD;
        let avail = (self.geom.content_width() - QUOTE_BAR_WIDTH - 2.0 * QUOTE_PAD).max(1.0);

        let lines = wrap_text(text, FontWeight::Italic, size, avail);
        let box_h = 2.0 * QUOTE_VPAD + lines.len() as f32 * lh;
        self.ensure_room(box_h);

        self.push(DrawCommand::FilledRect {
            x: self.geom.margin,
            y: self.y,
            w: self.geom.content_width(),
            h: box_h,
            color: self.style.quote_background,
        });
        self.push(DrawCommand::FilledRect {
            x: self.geom.margin,
            y: self.y,
            w: QUOTE_BAR_WIDTH,
            h: box_h,
            color: self.style.border,
        });

        let mut line_top = self.y + QUOTE_VPAD;
        for line in &lines {
            self.text_at(
                text_x,
                line_top + size * ASCENDER,
                line,
                size,
                FontWeight::Italic,
                self.style.secondary,
            );
            line_top += lh;
        }

        self.y += box_h;
        self.finish_block();
    }

    fn place_rule(&mut self) {
        self.ensure_room(2.0 * RULE_SPACING + RULE_WIDTH);
        self.y += RULE_SPACING;
        self.push(DrawCommand::Line {
            x1: self.geom.margin,
            y1: self.y,
            x2: self.geom.margin + self.geom.content_width(),
            y2: self.y,
            color: self.style.border,
            width: RULE_WIDTH,
        });
        self.y += RULE_WIDTH + RULE_SPACING;
        self.finish_block();
    }
}

#![allow(dead_code)]

use mdtree_pdf::{DrawCommand, FontWeight, MarkupNode, Page};

pub fn el(tag: &str, children: Vec<MarkupNode>) -> MarkupNode {
    MarkupNode::element(tag, children)
}

pub fn txt(s: &str) -> MarkupNode {
    MarkupNode::text(s)
}

pub fn leaf(tag: &str, s: &str) -> MarkupNode {
    el(tag, vec![txt(s)])
}

/// All text contents across pages, in paint order, tagged with page index.
pub fn texts(pages: &[Page]) -> Vec<(usize, String)> {
    pages
        .iter()
        .flat_map(|page| {
            page.commands.iter().filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some((page.index, content.clone())),
                _ => None,
            })
        })
        .collect()
}

/// Page indices on which a text command containing `needle` appears.
pub fn pages_mentioning(pages: &[Page], needle: &str) -> Vec<usize> {
    let mut found: Vec<usize> = texts(pages)
        .into_iter()
        .filter(|(_, content)| content.contains(needle))
        .map(|(idx, _)| idx)
        .collect();
    found.dedup();
    found
}

pub fn count_mono_texts(page: &Page) -> usize {
    page.commands
        .iter()
        .filter(|cmd| {
            matches!(
                cmd,
                DrawCommand::Text {
                    weight: FontWeight::Mono,
                    ..
                }
            )
        })
        .count()
}

pub fn count_filled_rects(page: &Page) -> usize {
    page.commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::FilledRect { .. }))
        .count()
}

pub fn count_stroked_rects(page: &Page) -> usize {
    page.commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::StrokedRect { .. }))
        .count()
}

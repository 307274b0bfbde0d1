use crate::model::{Block, MarkupNode};

/// Walk the rendered markup tree and emit the ordered block sequence the
/// layout engine consumes. Inline spans (emphasis, links, inline code) are
/// discarded: every block reduces to plain text.
pub fn flatten(root: &MarkupNode) -> Vec<Block> {
    let mut blocks = Vec::new();
    walk(root, &mut blocks);
    blocks
}

fn walk(node: &MarkupNode, blocks: &mut Vec<Block>) {
    match node.tag.as_str() {
        "h1" => push_heading(1, node, blocks),
        "h2" => push_heading(2, node, blocks),
        // Finer heading levels collapse to 3
        "h3" | "h4" | "h5" | "h6" => push_heading(3, node, blocks),
        "p" => {
            let text = inline_text(node);
            if !text.is_empty() {
                blocks.push(Block::Paragraph { text });
            }
        }
        "ul" => walk_list(node, 0, false, blocks),
        "ol" => walk_list(node, 0, true, blocks),
        "pre" | "code" => push_code(node, blocks),
        "blockquote" => {
            let text = inline_text(node);
            if !text.is_empty() {
                blocks.push(Block::Blockquote { text });
            }
        }
        "table" => {
            if let Some(block) = flatten_table(node) {
                blocks.push(block);
            }
        }
        "hr" => blocks.push(Block::Rule),
        "" => {
            // Bare text at block position becomes a paragraph
            let text = node.text.trim();
            if !text.is_empty() {
                blocks.push(Block::Paragraph {
                    text: text.to_string(),
                });
            }
        }
        // Unclassified containers are transparent
        _ => {
            for child in &node.children {
                walk(child, blocks);
            }
        }
    }
}

fn push_heading(level: u8, node: &MarkupNode, blocks: &mut Vec<Block>) {
    let text = inline_text(node);
    if !text.is_empty() {
        blocks.push(Block::Heading { level, text });
    }
}

/// Emit the items of one list, recursing into nested lists with a deeper
/// indent. Each list owns its ordinal counter, so sibling ordered lists
/// both start at 1.
fn walk_list(list: &MarkupNode, indent: usize, ordered: bool, blocks: &mut Vec<Block>) {
    let mut ordinal = 1u32;
    for child in &list.children {
        if child.tag != "li" {
            continue;
        }
        let text = item_text(child);
        if !text.is_empty() {
            blocks.push(Block::ListItem {
                text,
                indent,
                ordered,
                ordinal,
            });
        }
        ordinal += 1;
        // Nested lists flatten immediately after their parent item
        for sub in &child.children {
            match sub.tag.as_str() {
                "ul" => walk_list(sub, indent + 1, false, blocks),
                "ol" => walk_list(sub, indent + 1, true, blocks),
                _ => {}
            }
        }
    }
}

fn push_code(node: &MarkupNode, blocks: &mut Vec<Block>) {
    let source = first_code_descendant(node).unwrap_or(node);
    let raw = raw_text(source);
    if raw.trim().is_empty() {
        return;
    }
    blocks.push(Block::CodeBlock {
        lines: raw.lines().map(str::to_string).collect(),
    });
}

fn first_code_descendant(node: &MarkupNode) -> Option<&MarkupNode> {
    for child in &node.children {
        if child.tag == "code" {
            return Some(child);
        }
        if let Some(found) = first_code_descendant(child) {
            return Some(found);
        }
    }
    None
}

fn flatten_table(table: &MarkupNode) -> Option<Block> {
    let mut header_rows: Vec<Vec<String>> = Vec::new();
    let mut body_rows: Vec<Vec<String>> = Vec::new();
    collect_rows(table, false, &mut header_rows, &mut body_rows);

    if header_rows.is_empty() && body_rows.is_empty() {
        return None;
    }

    let has_header_row = !header_rows.is_empty();
    let mut rows = header_rows;
    rows.extend(body_rows);
    Some(Block::Table {
        rows,
        has_header_row,
    })
}

fn collect_rows(
    node: &MarkupNode,
    in_header: bool,
    header_rows: &mut Vec<Vec<String>>,
    body_rows: &mut Vec<Vec<String>>,
) {
    for child in &node.children {
        match child.tag.as_str() {
            "thead" => collect_rows(child, true, header_rows, body_rows),
            "tbody" | "tfoot" => collect_rows(child, false, header_rows, body_rows),
            "tr" => {
                let mut cells = Vec::new();
                let mut all_th = true;
                for cell in &child.children {
                    match cell.tag.as_str() {
                        "th" => cells.push(inline_text(cell)),
                        "td" => {
                            all_th = false;
                            cells.push(inline_text(cell));
                        }
                        _ => {}
                    }
                }
                if cells.is_empty() {
                    continue;
                }
                if in_header || all_th {
                    header_rows.push(cells);
                } else {
                    body_rows.push(cells);
                }
            }
            // Nested tables are not re-entered; anything else is transparent
            "table" => {}
            _ => collect_rows(child, in_header, header_rows, body_rows),
        }
    }
}

// The markup renderer already spaced the text nodes, so pieces concatenate
// directly with no separator.
fn inline_text(node: &MarkupNode) -> String {
    raw_text(node).trim().to_string()
}

fn raw_text(node: &MarkupNode) -> String {
    let mut out = String::new();
    append_text(node, &mut out);
    out
}

fn append_text(node: &MarkupNode, out: &mut String) {
    out.push_str(&node.text);
    for child in &node.children {
        append_text(child, out);
    }
}

/// Item text excludes nested list subtrees; those flatten into items of
/// their own.
fn item_text(item: &MarkupNode) -> String {
    let mut out = String::new();
    out.push_str(&item.text);
    for child in &item.children {
        if child.tag != "ul" && child.tag != "ol" {
            append_text(child, &mut out);
        }
    }
    out.trim().to_string()
}

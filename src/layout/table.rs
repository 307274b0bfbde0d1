use crate::model::{DrawCommand, FontWeight};

use super::{ASCENDER, CELL_PAD, Paginator};

impl Paginator<'_> {
    /// Uniform column grid: the widest row sets the column count and every
    /// column gets an equal share of the content width. Each cell renders at
    /// most one text line; overflow runs under the adjoining border rather
    /// than wrapping or truncating.
    pub(super) fn place_table(&mut self, rows: &[Vec<String>], has_header_row: bool) {
        let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let size = self.style.body_size;
        let lh = self.style.line_advance(size);
        let col_w = (self.geom.content_width() - CELL_PAD) / columns as f32;
        let row_h = lh + CELL_PAD;

        // Tables never split across pages
        self.ensure_room(rows.len() as f32 * row_h);
        log::debug!(
            "TABLE rows={} columns={} col_w={:.2} y={:.2}",
            rows.len(),
            columns,
            col_w,
            self.y
        );

        let x0 = self.geom.margin;
        for (ri, row) in rows.iter().enumerate() {
            let is_header = has_header_row && ri == 0;
            let row_y = self.y;

            if is_header {
                self.push(DrawCommand::FilledRect {
                    x: x0,
                    y: row_y,
                    w: col_w * columns as f32,
                    h: row_h,
                    color: self.style.table_header_background,
                });
            }

            for ci in 0..columns {
                let cx = x0 + ci as f32 * col_w;
                self.push(DrawCommand::StrokedRect {
                    x: cx,
                    y: row_y,
                    w: col_w,
                    h: row_h,
                    color: self.style.border,
                });

                let Some(cell) = row.get(ci) else { continue };
                if cell.is_empty() {
                    continue;
                }
                let weight = if is_header {
                    FontWeight::Bold
                } else {
                    FontWeight::Regular
                };
                self.push(DrawCommand::Text {
                    x: cx + CELL_PAD / 2.0,
                    y: row_y + CELL_PAD / 2.0 + size * ASCENDER,
                    content: cell.clone(),
                    font_size: size,
                    weight,
                    color: self.style.text,
                });
            }
            self.y += row_h;
        }
        self.finish_block();
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::paginate;
    use crate::model::{Block, DrawCommand, FontWeight, PageGeometry};
    use crate::style::resolve;

    fn table(rows: &[&[&str]], has_header_row: bool) -> Block {
        Block::Table {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            has_header_row,
        }
    }

    #[test]
    fn header_row_gets_background_and_bold_text() {
        let style = resolve("light", "medium").unwrap();
        let pages = paginate(
            &[table(&[&["A", "B"], &["1", "2"]], true)],
            &style,
            PageGeometry::default(),
        );
        let cmds = &pages[0].commands;

        let fills: Vec<_> = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledRect { .. }))
            .collect();
        assert_eq!(fills.len(), 1);

        let weights: Vec<FontWeight> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { weight, content, .. } => Some((*weight, content.as_str())),
                _ => None,
            })
            .map(|(w, _)| w)
            .collect();
        assert_eq!(
            weights,
            vec![
                FontWeight::Bold,
                FontWeight::Bold,
                FontWeight::Regular,
                FontWeight::Regular
            ]
        );
    }

    #[test]
    fn every_cell_gets_an_equal_width_border() {
        let style = resolve("light", "medium").unwrap();
        let pages = paginate(
            &[table(&[&["A", "B"], &["1", "2"]], true)],
            &style,
            PageGeometry::default(),
        );
        let borders: Vec<(f32, f32)> = pages[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokedRect { w, h, .. } => Some((*w, *h)),
                _ => None,
            })
            .collect();
        assert_eq!(borders.len(), 4);
        let (w0, h0) = borders[0];
        for (w, h) in &borders {
            assert_eq!(*w, w0);
            assert_eq!(*h, h0);
        }
    }

    #[test]
    fn ragged_rows_pad_to_widest_row() {
        let style = resolve("light", "medium").unwrap();
        let pages = paginate(
            &[table(&[&["a"], &["b", "c", "d"]], false)],
            &style,
            PageGeometry::default(),
        );
        // 2 rows x 3 columns of borders, 4 non-empty cells of text
        let cmds = &pages[0].commands;
        let borders = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokedRect { .. }))
            .count();
        let texts = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(borders, 6);
        assert_eq!(texts, 4);
    }
}

//! Clickable list builder.
//!
//! Pairs rendered [`Line`]s with click actions so render code never has to
//! compute row offsets by hand. A line is either plain, clickable across its
//! whole row, or split into segments that each carry their own action.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::{Line, Span};

use crate::input::ClickState;

enum RowAction {
    Row(u16),
    /// `(start_col, width, action_id)` relative to the content's left edge.
    Segments(Vec<(u16, u16, u16)>),
}

/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Fleet"));
/// cl.push_clickable(Line::from("[1] Hot Dogs"), RUN_BASE);
/// cl.push_segmented(vec![(Span::raw("[Q] Buy"), Some(BUY_BASE)), (Span::raw(" "), None)]);
/// cl.register_targets(area, &mut cs, 1, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action)` pairs.
    actions: Vec<(u16, RowAction)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line whose whole row triggers `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, RowAction::Row(action_id)));
        self.lines.push(line);
    }

    /// Add a line built from spans, each optionally bound to its own action.
    pub fn push_segmented(&mut self, segments: Vec<(Span<'a>, Option<u16>)>) {
        let idx = self.lines.len() as u16;
        let mut col: u16 = 0;
        let mut hits = Vec::new();
        let mut spans = Vec::with_capacity(segments.len());
        for (span, action) in segments {
            let w = span.width() as u16;
            if let Some(id) = action {
                hits.push((col, w, id));
            }
            col += w;
            spans.push(span);
        }
        self.actions.push((idx, RowAction::Segments(hits)));
        self.lines.push(Line::from(spans));
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset`: rows of border before and after content.
    /// * `left_offset`: columns of border before content, for segment targets.
    ///
    /// Lines are assumed not to wrap; lines past the bottom of `area` are skipped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        left_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        let content_x = area.x + left_offset;
        let content_right = area.x + area.width;

        for (line_idx, action) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            match action {
                RowAction::Row(id) => cs.add_row_target(area, row, *id),
                RowAction::Segments(hits) => {
                    for &(start, width, id) in hits {
                        let x = content_x + start;
                        if x >= content_right {
                            continue;
                        }
                        let w = width.min(content_right - x);
                        cs.add_click_target(Rect::new(x, row, w, 1), id);
                    }
                }
            }
        }
    }
}

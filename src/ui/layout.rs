//! Screen geometry and pre-wrapping of transcript lines.
//!
//! Lines are wrapped here rather than by `Paragraph` so the renderer and the
//! scroll handlers agree on exactly how many rows the transcript occupies.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

pub const SIDEBAR_WIDTH: u16 = 32;
/// Below this width the sidebar is dropped.
pub const SIDEBAR_MIN_FRAME_WIDTH: u16 = 72;
pub const MAX_INPUT_ROWS: u16 = 6;
const HEADER_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub sidebar: Option<Rect>,
    pub header: Rect,
    pub transcript: Rect,
    pub status: Rect,
    pub input: Rect,
}

impl ScreenAreas {
    pub fn compute(area: Rect, input_rows: u16) -> Self {
        let (sidebar, main) = if area.width >= SIDEBAR_MIN_FRAME_WIDTH {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(area);
            (Some(columns[0]), columns[1])
        } else {
            (None, area)
        };

        let input_height = input_rows.clamp(1, MAX_INPUT_ROWS) + 2;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(input_height),
            ])
            .split(main);

        Self {
            sidebar,
            header: rows[0],
            transcript: rows[1],
            status: rows[2],
            input: rows[3],
        }
    }

    /// Transcript area inside its border.
    pub fn transcript_inner(&self) -> Rect {
        inner(self.transcript)
    }

    pub fn input_inner(&self) -> Rect {
        inner(self.input)
    }
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Largest scroll offset that still fills the viewport.
pub fn max_scroll(total_rows: usize, viewport_height: u16) -> u16 {
    let total = u16::try_from(total_rows).unwrap_or(u16::MAX);
    total.saturating_sub(viewport_height)
}

struct Token {
    style: Style,
    text: String,
    width: usize,
    blank: bool,
}

fn tokenize(line: &Line<'_>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for span in &line.spans {
        let style = line.style.patch(span.style);
        for c in span.content.chars() {
            let blank = c.is_whitespace();
            let w = c.width().unwrap_or(0);
            match tokens.last_mut() {
                Some(last) if last.blank == blank && last.style == style => {
                    last.text.push(c);
                    last.width += w;
                }
                _ => tokens.push(Token {
                    style,
                    text: c.to_string(),
                    width: w,
                    blank,
                }),
            }
        }
    }
    tokens
}

fn push_span(rows: &mut [Vec<Span<'static>>], style: Style, text: String) {
    if let Some(row) = rows.last_mut() {
        row.push(Span::styled(text, style));
    }
}

/// Greedy word wrap preserving interior spacing and leading indentation.
/// Words wider than `width` are split at character boundaries. Whitespace
/// at a break is dropped.
pub fn wrap_line(line: &Line<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut row_width = 0usize;
    let mut pending_blank: Option<Token> = None;

    for token in tokenize(line) {
        if token.blank {
            let leading = rows.len() == 1 && row_width == 0;
            if leading && token.width <= width {
                row_width = token.width;
                push_span(&mut rows, token.style, token.text);
            } else if row_width > 0 {
                pending_blank = Some(token);
            }
            continue;
        }

        let gap = pending_blank.as_ref().map_or(0, |blank| blank.width);
        if row_width + gap + token.width <= width {
            if let Some(blank) = pending_blank.take() {
                push_span(&mut rows, blank.style, blank.text);
            }
            row_width += gap + token.width;
            push_span(&mut rows, token.style, token.text);
            continue;
        }

        pending_blank = None;
        if row_width > 0 {
            rows.push(Vec::new());
            row_width = 0;
        }

        if token.width <= width {
            row_width = token.width;
            push_span(&mut rows, token.style, token.text);
            continue;
        }

        // Overlong word: split across as many rows as it needs
        let mut piece = String::new();
        for c in token.text.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && row_width > 0 {
                push_span(&mut rows, token.style, std::mem::take(&mut piece));
                rows.push(Vec::new());
                row_width = 0;
            }
            piece.push(c);
            row_width += w;
        }
        if !piece.is_empty() {
            push_span(&mut rows, token.style, piece);
        }
    }

    rows.into_iter().map(Line::from).collect()
}

pub fn wrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    lines.iter().flat_map(|line| wrap_line(line, width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn short_lines_are_untouched() {
        let wrapped = wrap_line(&Line::from("fn main() {}"), 40);
        assert_eq!(texts(&wrapped), vec!["fn main() {}"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let wrapped = wrap_line(&Line::from("print the value here"), 10);
        assert_eq!(texts(&wrapped), vec!["print the", "value here"]);
    }

    #[test]
    fn keeps_indentation() {
        let wrapped = wrap_line(&Line::from("    let x = 1;"), 40);
        assert_eq!(texts(&wrapped), vec!["    let x = 1;"]);
    }

    #[test]
    fn splits_overlong_words() {
        let wrapped = wrap_line(&Line::from("abcdefghij"), 4);
        assert_eq!(texts(&wrapped), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_line_occupies_one_row() {
        assert_eq!(wrap_line(&Line::from(""), 10).len(), 1);
    }

    #[test]
    fn sidebar_hidden_on_narrow_frames() {
        let narrow = ScreenAreas::compute(Rect::new(0, 0, 60, 20), 1);
        assert!(narrow.sidebar.is_none());
        assert_eq!(narrow.transcript.width, 60);

        let wide = ScreenAreas::compute(Rect::new(0, 0, 100, 20), 1);
        assert_eq!(wide.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert_eq!(wide.input.height, 3);
    }

    #[test]
    fn max_scroll_saturates() {
        assert_eq!(max_scroll(5, 10), 0);
        assert_eq!(max_scroll(25, 10), 15);
    }
}

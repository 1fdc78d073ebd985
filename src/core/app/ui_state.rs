use crate::ui::theme::Theme;
use ratatui::crossterm::event::KeyEvent;
use std::time::Instant;
use tui_textarea::{Input as TAInput, TextArea};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Severity of the one-line status shown under the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Input rows hard-wrapped to the box width, with the cursor cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub rows: Vec<String>,
    /// (row, column in cells)
    pub cursor: (usize, usize),
}

/// Everything the renderer needs that is not part of the chat session.
#[derive(Debug, Clone)]
pub struct UiState {
    pub theme: Theme,
    textarea: TextArea<'static>,
    /// Mirror of the textarea contents, lines joined with `\n`.
    input: String,
    pub status: Option<Status>,
    /// Set while a reply is outstanding; drives the progress indicator.
    pub waiting_since: Option<Instant>,
    /// Lines scrolled from the top of the transcript when `auto_scroll` is off.
    pub scroll_offset: u16,
    pub auto_scroll: bool,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            textarea: TextArea::default(),
            input: String::new(),
            status: None,
            waiting_since: None,
            scroll_offset: 0,
            auto_scroll: true,
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn begin_waiting(&mut self) {
        self.waiting_since = Some(Instant::now());
    }

    pub fn end_waiting(&mut self) {
        self.waiting_since = None;
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_since.is_some()
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// Cursor as (line, character index) within the input.
    pub fn input_cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
        self.sync_input_from_textarea();
    }

    fn sync_input_from_textarea(&mut self) {
        self.input = self.textarea.lines().join("\n");
    }

    pub fn insert_char(&mut self, c: char) {
        self.apply_textarea_edit(|ta| {
            ta.insert_char(c);
        });
    }

    pub fn insert_newline(&mut self) {
        self.apply_textarea_edit(|ta| {
            ta.insert_newline();
        });
    }

    /// Cursor movement and editing chords (arrows, Home/End, Delete,
    /// word motions) handled by the textarea itself.
    pub fn edit_with_key(&mut self, key: KeyEvent) {
        self.apply_textarea_edit(|ta| {
            ta.input(TAInput::from(key));
        });
    }

    /// Delete the grapheme before the cursor, or join with the previous
    /// line at column zero.
    pub fn backspace(&mut self) {
        let (row, col) = self.textarea.cursor();
        let chars = if col == 0 {
            1
        } else {
            self.textarea
                .lines()
                .get(row)
                .and_then(|line| {
                    let prefix: String = line.chars().take(col).collect();
                    prefix
                        .graphemes(true)
                        .next_back()
                        .map(|grapheme| grapheme.chars().count())
                })
                .unwrap_or(1)
        };
        self.apply_textarea_edit(|ta| {
            for _ in 0..chars {
                ta.delete_char();
            }
        });
    }

    /// Insert pasted text at the cursor; CR and CRLF become line breaks.
    pub fn insert_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.apply_textarea_edit(|ta| {
            for (i, line) in normalized.split('\n').enumerate() {
                if i > 0 {
                    ta.insert_newline();
                }
                ta.insert_str(line);
            }
        });
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.input.clear();
    }

    pub fn take_input(&mut self) -> String {
        let text = std::mem::take(&mut self.input);
        self.textarea = TextArea::default();
        text
    }

    /// Hard-wrap the input at `width` cells and locate the cursor. A cursor
    /// after a row that exactly fills the width moves to a fresh row.
    pub fn input_layout(&self, width: u16) -> InputLayout {
        let width = usize::from(width.max(1));
        let (cursor_line, cursor_col) = self.textarea.cursor();
        let mut rows = Vec::new();
        let mut cursor = (0, 0);

        for (line_index, logical) in self.textarea.lines().iter().enumerate() {
            let on_cursor_line = line_index == cursor_line;
            let mut row = String::new();
            let mut row_width = 0;
            let mut char_count = 0;
            for (char_index, c) in logical.chars().enumerate() {
                let w = c.width().unwrap_or(0);
                if row_width + w > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                if on_cursor_line && char_index == cursor_col {
                    cursor = (rows.len(), row_width);
                }
                row.push(c);
                row_width += w;
                char_count += 1;
            }
            if on_cursor_line && cursor_col >= char_count {
                if row_width >= width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                cursor = (rows.len(), row_width);
            }
            rows.push(row);
        }

        InputLayout { rows, cursor }
    }

    /// Scroll position to render with, given the largest valid offset.
    pub fn effective_scroll(&self, max_offset: u16) -> u16 {
        if self.auto_scroll {
            max_offset
        } else {
            self.scroll_offset.min(max_offset)
        }
    }

    pub fn scroll_up(&mut self, lines: u16, max_offset: u16) {
        if max_offset == 0 {
            return;
        }
        let current = self.effective_scroll(max_offset);
        self.scroll_offset = current.saturating_sub(lines);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, lines: u16, max_offset: u16) {
        let current = self.effective_scroll(max_offset);
        self.scroll_offset = current.saturating_add(lines).min(max_offset);
        // Reaching the bottom re-enables following new turns
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
    }
}

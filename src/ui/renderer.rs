use crate::core::app::{App, StatusKind};
use crate::core::message::Turn;
use crate::core::models::ModelSelection;
use crate::ui::layout::{max_scroll, wrap_lines, ScreenAreas};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

pub const TITLE: &str = "🧠 DeepSeek Code Companion";
pub const CAPTION: &str = "🚀 Your AI Pair Programmer with Debugging Superpowers";
pub const INPUT_PLACEHOLDER: &str = "Type your coding question here...";
const CAPABILITIES: [&str; 4] = [
    "🐍 Python Expert",
    "🐞 Debugging Assistant",
    "📝 Code Documentation",
    "💡 Solution Design",
];

/// Screen areas for the current frame size and input length.
pub fn screen_areas(app: &App, area: Rect) -> ScreenAreas {
    // The inner input width depends on the layout, so measure with a first pass
    let provisional = ScreenAreas::compute(area, 1);
    let rows = app.ui.input_layout(provisional.input_inner().width).rows.len();
    ScreenAreas::compute(area, u16::try_from(rows).unwrap_or(u16::MAX))
}

/// Transcript rows wrapped to `width`, as they will be drawn.
pub fn transcript_rows(app: &App, width: u16) -> Vec<Line<'static>> {
    wrap_lines(&build_display_lines(app), width)
}

/// Largest valid transcript scroll offset for a frame of size `area`.
pub fn transcript_max_scroll(app: &App, area: Rect) -> u16 {
    let inner = screen_areas(app, area).transcript_inner();
    max_scroll(transcript_rows(app, inner.width).len(), inner.height)
}

pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.ui.theme;
    let mut lines = Vec::new();
    for turn in app.session.conversation() {
        push_turn(&mut lines, turn, theme);
    }
    lines
}

fn push_turn(lines: &mut Vec<Line<'static>>, turn: &Turn, theme: &Theme) {
    let (prefix, prefix_style, text_style) = if turn.is_user() {
        ("You: ", theme.user_prefix_style, theme.user_text_style)
    } else {
        (
            "DeepSeek: ",
            theme.assistant_prefix_style,
            theme.assistant_text_style,
        )
    };

    let mut content_lines = turn.content().lines();
    let first = content_lines.next().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(first.to_string(), text_style),
    ]));
    for content_line in content_lines {
        lines.push(Line::from(Span::styled(content_line.to_string(), text_style)));
    }
    // Empty line for spacing
    lines.push(Line::from(""));
}

pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.ui.theme;
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let areas = screen_areas(app, area);
    if let Some(sidebar) = areas.sidebar {
        render_sidebar(f, app, sidebar);
    }
    render_header(f, theme, areas.header);
    render_transcript(f, app, &areas);
    render_status(f, app, areas.status);
    render_input(f, app, &areas);
}

fn render_header(f: &mut Frame, theme: &Theme, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(TITLE, theme.title_style)),
        Line::from(Span::styled(CAPTION, theme.caption_style)),
    ]);
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let selected = app.session.model();

    let mut lines = vec![Line::from(Span::styled("Choose Model", theme.header_style))];
    for model in ModelSelection::ALL {
        let line = if model == selected {
            Line::from(Span::styled(format!("▸ {model}"), theme.selection_style))
        } else {
            Line::from(Span::styled(format!("  {model}"), theme.sidebar_text_style))
        };
        lines.push(line);
    }
    lines.push(Line::from(Span::styled(
        "  Tab / Shift+Tab to switch",
        theme.sidebar_text_style,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Model Capabilities", theme.header_style)));
    for capability in CAPABILITIES {
        lines.push(Line::from(Span::styled(
            format!("- {capability}"),
            theme.sidebar_text_style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Ctrl+L", theme.key_hint_style),
        Span::styled(" Clear Chat History", theme.sidebar_text_style),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Built with Ollama",
        theme.caption_style,
    )));
    lines.push(Line::from(Span::styled(
        app.base_url.clone(),
        theme.caption_style,
    )));

    let sidebar = Paragraph::new(wrap_lines(&lines, area.width.saturating_sub(2))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style)
            .title(Span::styled("⚙️ Configuration", theme.header_style)),
    );
    f.render_widget(sidebar, area);
}

fn render_transcript(f: &mut Frame, app: &App, areas: &ScreenAreas) {
    let theme = &app.ui.theme;
    let inner = areas.transcript_inner();
    let rows = transcript_rows(app, inner.width);
    let scroll_offset = app
        .ui
        .effective_scroll(max_scroll(rows.len(), inner.height));

    let transcript = Paragraph::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style)
                .title(Span::styled("Chat Messages", theme.header_style)),
        )
        .scroll((scroll_offset, 0));
    f.render_widget(transcript, areas.transcript);
}

/// Pulsing indicator, two cycles per second.
pub fn pulse_symbol(elapsed: Duration) -> &'static str {
    let elapsed = elapsed.as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "○"
    } else if pulse_intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let line = if let Some(since) = app.ui.waiting_since {
        Line::from(vec![
            Span::styled(pulse_symbol(since.elapsed()), theme.processing_style),
            Span::styled(" 🧠 Processing...", theme.processing_style),
        ])
    } else if let Some(status) = &app.ui.status {
        let style = match status.kind {
            StatusKind::Info => theme.info_style,
            StatusKind::Warning => theme.warning_style,
            StatusKind::Error => theme.error_style,
        };
        // Single row; multi-line server errors are flattened
        let text = status.text.split_whitespace().collect::<Vec<_>>().join(" ");
        Line::from(Span::styled(text, style))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_input(f: &mut Frame, app: &App, areas: &ScreenAreas) {
    let theme = &app.ui.theme;
    let inner = areas.input_inner();
    let waiting = app.ui.is_waiting();

    let input_title = if waiting {
        "Waiting for reply (Esc or Ctrl+C to quit)"
    } else {
        "Enter to send • Tab model • Ctrl+L clear • Esc quit"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(input_title, theme.input_title_style));

    if app.ui.input_text().is_empty() {
        let placeholder = Paragraph::new(Span::styled(INPUT_PLACEHOLDER, theme.placeholder_style))
            .block(block);
        f.render_widget(placeholder, areas.input);
        if !waiting {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    // Keep the cursor row inside the box when the input is taller than it
    let layout = app.ui.input_layout(inner.width);
    let (cursor_row, cursor_col) = layout.cursor;
    let visible = usize::from(inner.height.max(1));
    let skip = cursor_row.saturating_sub(visible - 1);
    let shown: Vec<Line> = layout
        .rows
        .iter()
        .skip(skip)
        .take(visible)
        .map(|row| Line::from(Span::styled(row.clone(), theme.input_text_style)))
        .collect();

    f.render_widget(Paragraph::new(shown).block(block), areas.input);

    if !waiting {
        let x = inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX);
        let y = inner.y + u16::try_from(cursor_row - skip).unwrap_or(0);
        f.set_cursor_position((x, y));
    }
}

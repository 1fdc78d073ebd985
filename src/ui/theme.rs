use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub caption_style: Style,
    pub header_style: Style,
    pub border_style: Style,
    pub sidebar_text_style: Style,
    pub selection_style: Style,
    pub key_hint_style: Style,
    pub processing_style: Style,

    // Status line
    pub info_style: Style,
    pub warning_style: Style,
    pub error_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub placeholder_style: Style,
}

const ACCENT: Color = Color::Rgb(0x00, 0xff, 0xcc);
const DANGER: Color = Color::Rgb(0xe6, 0x39, 0x46);

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Rgb(0x1a, 0x1a, 0x1a),
            user_prefix_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::White),
            assistant_prefix_style: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(ACCENT),

            title_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            caption_style: Style::default().fg(Color::Gray),
            header_style: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::Rgb(0x5a, 0x5a, 0x5a)),
            sidebar_text_style: Style::default().fg(Color::Gray),
            selection_style: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            key_hint_style: Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
            processing_style: Style::default().fg(ACCENT),

            info_style: Style::default().fg(Color::Gray),
            warning_style: Style::default().fg(Color::Yellow),
            error_style: Style::default().fg(DANGER),

            input_border_style: Style::default().fg(Color::Rgb(0x5a, 0x5a, 0x5a)),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Black),
            assistant_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Blue),

            title_style: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            caption_style: Style::default().fg(Color::DarkGray),
            header_style: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::Gray),
            sidebar_text_style: Style::default().fg(Color::DarkGray),
            selection_style: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            key_hint_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            processing_style: Style::default().fg(Color::Blue),

            info_style: Style::default().fg(Color::DarkGray),
            warning_style: Style::default().fg(Color::Rgb(0xb5, 0x89, 0x00)),
            error_style: Style::default().fg(Color::Red),

            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            placeholder_style: Style::default().fg(Color::Gray),
        }
    }

    /// Look up a built-in theme; unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark_default(),
            "light" => Self::light(),
            other => {
                warn!(theme = other, "unknown theme, using dark");
                Self::dark_default()
            }
        }
    }
}

use ratatui::style::Modifier;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub header: Style,
    pub weekday: Style,
    /// Days borrowed from the adjacent months, and the edge years of the year view.
    pub outside: Style,
    pub today: Style,
    pub selected: Style,
    pub focused: Style,
    pub placeholder: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            header: Style::default().add_modifier(Modifier::BOLD),
            weekday: Style::default().dark_gray(),
            outside: Style::default().dark_gray(),
            today: Style::default().cyan().add_modifier(Modifier::UNDERLINED),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            focused: Style::default().yellow().add_modifier(Modifier::BOLD),
            placeholder: Style::default().dark_gray(),
            border: Style::default().dark_gray(),
        }
    }
}

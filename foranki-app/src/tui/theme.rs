use ratatui::style::{Color, Style};
use ratatui::style::Stylize;

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn deck_style() -> Style { Style::default().fg(Color::DarkGray) }
pub fn tag_style() -> Style { Style::default().fg(Color::Blue) }
pub fn selected_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn error_style() -> Style { Style::default().fg(Color::Red) }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }

use crate::tui::theme::*;
use foranki_core::{Card, TagSelection};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Everything one frame needs; borrowed from the app for the draw call.
pub struct Screen<'a> {
    pub tags: &'a [String],
    pub selected: &'a TagSelection,
    /// 0 is the "All" row, tags start at 1.
    pub cursor: usize,
    pub cards: &'a [Card],
    pub total: usize,
    pub loading: bool,
    pub error: Option<&'a str>,
}

pub fn draw_ui(f: &mut Frame, area: Rect, screen: &Screen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);
    draw_tags(f, chunks[0], screen);
    draw_cards(f, chunks[1], screen);
    draw_status(f, rows[1], screen);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j move  "),
        Span::raw(" space toggle  "),
        Span::raw(" a all  "),
        Span::raw(" r refresh  "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style());
    f.render_widget(foot, rows[2]);
}

fn draw_tags(f: &mut Frame, area: Rect, screen: &Screen) {
    let all = std::iter::once(("All".to_string(), screen.selected.is_empty()));
    let tags = screen
        .tags
        .iter()
        .map(|t| (format!("#{t}"), screen.selected.contains(t)));

    let items: Vec<_> = all
        .chain(tags)
        .enumerate()
        .map(|(i, (label, on))| {
            let mark = if on { "[x] " } else { "[ ] " };
            let line = Line::from(format!("{mark}{label}"));
            let line = if i == screen.cursor { line.style(selected_style()) } else { line };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Tags").borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_cards(f: &mut Frame, area: Rect, screen: &Screen) {
    let title = format!("Your Cards ({}/{})", screen.cards.len(), screen.total);
    let block = Block::default().title(Span::styled(title, title_style())).borders(Borders::ALL);

    if screen.cards.is_empty() {
        let hint = if screen.selected.is_empty() {
            "Create your first card with `foranki cards add`."
        } else {
            "Try selecting different tags or clear the filter."
        };
        let p = Paragraph::new(vec![Line::from("No cards found"), Line::from(hint)])
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<_> = screen
        .cards
        .iter()
        .map(|c| {
            let mut head = vec![Span::styled(c.deck_name.clone(), deck_style())];
            for t in &c.tags {
                head.push(Span::styled(format!(" #{t}"), tag_style()));
            }
            ListItem::new(vec![
                Line::from(head),
                Line::from(format!("Q: {}", c.front)),
                Line::from(format!("A: {}", c.back)),
                Line::from(""),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_status(f: &mut Frame, area: Rect, screen: &Screen) {
    let line = match (screen.loading, screen.error) {
        (true, _) => Line::from(" loading..."),
        (false, Some(e)) => Line::from(Span::styled(format!(" {e}"), error_style())),
        (false, None) => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

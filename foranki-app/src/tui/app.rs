use crate::tui::{inputs::{map_event, Action}, views::{self, Screen}};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use foranki_core::{all_tags, filter_by_tags, toggle_tag, CardService, CardStore, TagSelection};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::{runtime::Runtime, task::JoinHandle};
use tracing::warn;

pub struct TuiApp {
    store: Arc<CardStore>,
    rt: Arc<Runtime>,
    /// Fetch running on `rt`; the screen keeps drawing meanwhile.
    pending: Option<JoinHandle<()>>,
    tags: Vec<String>,
    selected: TagSelection,
    cursor: usize,
}

impl TuiApp {
    pub fn new(service: Arc<dyn CardService>, rt: Arc<Runtime>) -> Self {
        Self {
            store: Arc::new(CardStore::new(service)),
            rt,
            pending: None,
            tags: vec![],
            selected: TagSelection::new(),
            cursor: 0,
        }
    }

    fn refresh(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let store = self.store.clone();
        self.pending = Some(self.rt.spawn(async move { store.fetch_all().await }));
    }

    fn loading(&self) -> bool {
        self.pending.is_some() || self.store.loading()
    }

    /// Picks up a finished fetch and recomputes the tag pane. False while
    /// nothing has finished.
    fn settle(&mut self) -> bool {
        match &self.pending {
            Some(handle) if handle.is_finished() => {}
            _ => return false,
        }
        if let Some(handle) = self.pending.take() {
            if let Err(e) = self.rt.block_on(handle) {
                warn!(error = %e, "card fetch task failed");
            }
        }
        self.tags = all_tags(&self.store.cards());
        // Tags that vanished from every card can no longer be selected.
        self.selected.retain(|t| self.tags.contains(t));
        self.cursor = self.cursor.min(self.tags.len());
        true
    }

    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => {
                if self.cursor < self.tags.len() {
                    self.cursor += 1;
                }
            }
            Action::Toggle => {
                if self.cursor == 0 {
                    self.selected.clear();
                } else if let Some(tag) = self.tags.get(self.cursor - 1) {
                    self.selected = toggle_tag(&self.selected, tag);
                }
            }
            Action::ClearTags => self.selected.clear(),
            Action::Refresh => self.refresh(),
            Action::None => {}
        }
        true
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.refresh();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            self.settle();
            let all = self.store.cards();
            let cards = filter_by_tags(&all, &self.selected);
            let error = self.store.error();
            terminal.draw(|f| {
                let screen = Screen {
                    tags: &self.tags,
                    selected: &self.selected,
                    cursor: self.cursor,
                    cards: &cards,
                    total: all.len(),
                    loading: self.loading(),
                    error: error.as_deref(),
                };
                views::draw_ui(f, f.size(), &screen);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let action = map_event(event::read()?);
                if !self.apply(action) {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foranki_core::{memory::MemoryCardService, Card};
    use std::time::Duration;

    fn app_over(cards: Vec<Card>) -> TuiApp {
        let rt = Arc::new(Runtime::new().unwrap());
        TuiApp::new(Arc::new(MemoryCardService::with_cards(cards)), rt)
    }

    fn app_with_tags(tags: &[&str]) -> TuiApp {
        let mut app = app_over(vec![]);
        app.tags = tags.iter().map(|t| t.to_string()).collect();
        app
    }

    #[test]
    fn toggling_and_clearing_tags() {
        let mut app = app_with_tags(&["a", "b"]);
        assert!(app.apply(Action::Down));
        app.apply(Action::Toggle);
        assert!(app.selected.contains("a"));

        app.apply(Action::Down);
        app.apply(Action::Toggle);
        assert_eq!(app.selected.len(), 2);

        app.apply(Action::Toggle);
        assert!(!app.selected.contains("b"));

        app.apply(Action::Up);
        app.apply(Action::Up);
        app.apply(Action::Toggle);
        assert!(app.selected.is_empty());
    }

    #[test]
    fn cursor_stays_in_range_and_quit_stops() {
        let mut app = app_with_tags(&["only"]);
        for _ in 0..5 {
            app.apply(Action::Down);
        }
        assert_eq!(app.cursor, 1);
        app.apply(Action::ClearTags);
        assert!(app.selected.is_empty());
        assert!(!app.apply(Action::Quit));
    }

    #[test]
    fn refresh_runs_in_background_and_shows_loading() {
        let mut app = app_over(vec![
            Card::new(1, "q", "a", "d").with_tags(["b", "a"]),
            Card::new(2, "q", "a", "d").with_tags(["c"]),
        ]);
        assert!(!app.loading());

        app.apply(Action::Refresh);
        assert!(app.loading());
        assert!(app.tags.is_empty());

        let mut changed = false;
        for _ in 0..200 {
            if app.settle() {
                changed = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(changed, "fetch never finished");
        assert!(!app.loading());
        assert_eq!(app.tags, vec!["a", "b", "c"]);
        assert!(!app.settle());
    }
}

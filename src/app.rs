use crate::config::Config;
use crate::event::{AppEvent, Command};
use crate::github::store::RepoStore;
use crate::github::types::{Contributor, RateWindow, Repository};
use crate::ui::{
    contributor_panel::ContributorPanel,
    detail_panel::DetailPanel,
    header_bar::HeaderBar,
    help_panel::HelpPanel,
    input::{self, Action},
    repo_panel::RepoPanel,
    status_bar::StatusBar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel {
    Repositories,
    Contributors,
}

pub struct App {
    pub config: Config,
    pub store: RepoStore,
    pub contributors: Vec<Contributor>,
    pub rate_limit: Option<RateWindow>,

    pub active_panel: Panel,
    pub repo_selected: usize,
    pub repo_scroll: usize,
    pub contrib_selected: usize,
    pub contrib_scroll: usize,

    // Monotonic token identifying the newest contributor request; results
    // carrying an older token lost the race and are dropped.
    contributor_generation: u64,
    pub contributors_loading: bool,

    pub last_sync: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: RepoStore::default(),
            contributors: Vec::new(),
            rate_limit: None,
            active_panel: Panel::Repositories,
            repo_selected: 0,
            repo_scroll: 0,
            contrib_selected: 0,
            contrib_scroll: 0,
            contributor_generation: 0,
            contributors_loading: false,
            last_sync: "never".to_string(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        self.store
            .id_at(self.repo_selected)
            .and_then(|id| self.store.get(id))
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key);
                self.handle_action(action)
            }
            AppEvent::Resize => Vec::new(),
            AppEvent::Repositories(Ok(repositories)) => self.apply_repositories(repositories),
            AppEvent::Repositories(Err(e)) => {
                self.last_sync = format!("error: {e}");
                Vec::new()
            }
            AppEvent::Contributors { generation, result } => {
                self.apply_contributors(generation, result)
            }
            AppEvent::RateLimit(Ok(window)) => {
                self.rate_limit = Some(window);
                Vec::new()
            }
            AppEvent::RateLimit(Err(e)) => {
                self.last_sync = format!("error: {e}");
                Vec::new()
            }
        }
    }

    fn apply_repositories(&mut self, repositories: Vec<Repository>) -> Vec<Command> {
        self.store = RepoStore::from_repositories(repositories);
        self.repo_selected = 0;
        self.repo_scroll = 0;
        self.contributors.clear();
        self.contrib_selected = 0;
        self.contrib_scroll = 0;
        // Anything still in flight was requested against the old store.
        self.contributor_generation += 1;
        self.contributors_loading = false;
        self.last_sync = "just now".to_string();
        vec![Command::RefreshRateLimit]
    }

    fn apply_contributors(
        &mut self,
        generation: u64,
        result: Result<Vec<Contributor>, String>,
    ) -> Vec<Command> {
        if generation != self.contributor_generation {
            // Superseded by a later selection.
            return Vec::new();
        }
        self.contributors_loading = false;
        match result {
            Ok(contributors) => {
                self.contributors = contributors;
                self.contrib_selected = 0;
                self.contrib_scroll = 0;
                vec![Command::RefreshRateLimit]
            }
            Err(e) => {
                self.last_sync = format!("error: {e}");
                Vec::new()
            }
        }
    }

    /// A lookup miss (empty store, stale index) is a silent no-op: the
    /// detail panel degrades to placeholders and nothing is fetched.
    fn select_repository(&mut self) -> Vec<Command> {
        let Some(url) = self
            .selected_repository()
            .map(|repo| repo.contributors_url.clone())
        else {
            return Vec::new();
        };
        self.contributor_generation += 1;
        self.contributors_loading = true;
        self.contrib_selected = 0;
        self.contrib_scroll = 0;
        vec![Command::LoadContributors {
            url,
            generation: self.contributor_generation,
        }]
    }

    fn handle_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::ScrollDown => match self.active_panel {
                Panel::Repositories => {
                    if self.repo_selected + 1 < self.store.len() {
                        self.repo_selected += 1;
                        self.select_repository()
                    } else {
                        Vec::new()
                    }
                }
                Panel::Contributors => {
                    if self.contrib_selected + 1 < self.contributors.len() {
                        self.contrib_selected += 1;
                    }
                    Vec::new()
                }
            },
            Action::ScrollUp => match self.active_panel {
                Panel::Repositories => {
                    if self.repo_selected > 0 {
                        self.repo_selected -= 1;
                        self.select_repository()
                    } else {
                        Vec::new()
                    }
                }
                Panel::Contributors => {
                    self.contrib_selected = self.contrib_selected.saturating_sub(1);
                    Vec::new()
                }
            },
            Action::PanelLeft => {
                self.active_panel = Panel::Repositories;
                Vec::new()
            }
            Action::PanelRight => {
                self.active_panel = Panel::Contributors;
                Vec::new()
            }
            Action::Select => match self.active_panel {
                Panel::Repositories => self.select_repository(),
                Panel::Contributors => Vec::new(),
            },
            Action::Refresh => vec![Command::LoadRepositories],
            Action::Help => {
                self.show_help = !self.show_help;
                Vec::new()
            }
            Action::ClosePopup => {
                self.show_help = false;
                Vec::new()
            }
            Action::None => Vec::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(1)])
            .split(main_chunks[1]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(1)])
            .split(body_chunks[1]);

        self.ensure_scroll_bounds(
            body_chunks[0].height.saturating_sub(2) as usize,
            right_chunks[1].height.saturating_sub(2) as usize,
        );

        frame.render_widget(
            HeaderBar {
                org: &self.config.org,
                repo_count: self.store.len(),
            },
            main_chunks[0],
        );

        frame.render_widget(
            RepoPanel {
                store: &self.store,
                selected: self.repo_selected,
                scroll: self.repo_scroll,
                focused: self.active_panel == Panel::Repositories,
            },
            body_chunks[0],
        );

        frame.render_widget(
            DetailPanel {
                repo: self.selected_repository(),
            },
            right_chunks[0],
        );

        frame.render_widget(
            ContributorPanel {
                contributors: &self.contributors,
                selected: self.contrib_selected,
                scroll: self.contrib_scroll,
                focused: self.active_panel == Panel::Contributors,
                loading: self.contributors_loading,
            },
            right_chunks[1],
        );

        frame.render_widget(
            StatusBar {
                org: &self.config.org,
                repo_count: self.store.len(),
                last_sync: &self.last_sync,
                rate: self.rate_limit,
            },
            main_chunks[2],
        );

        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }
    }

    fn ensure_scroll_bounds(&mut self, repo_visible: usize, contrib_visible: usize) {
        if repo_visible > 0 {
            if self.repo_selected >= self.repo_scroll + repo_visible {
                self.repo_scroll = self.repo_selected - repo_visible + 1;
            }
            if self.repo_selected < self.repo_scroll {
                self.repo_scroll = self.repo_selected;
            }
        }
        if contrib_visible > 0 {
            if self.contrib_selected >= self.contrib_scroll + contrib_visible {
                self.contrib_scroll = self.contrib_selected - contrib_visible + 1;
            }
            if self.contrib_selected < self.contrib_scroll {
                self.contrib_scroll = self.contrib_selected;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn app_with_repos(repositories: Vec<Repository>) -> App {
        let mut app = App::new(Config::default());
        let commands = app.handle_event(AppEvent::Repositories(Ok(repositories)));
        assert_eq!(commands, vec![Command::RefreshRateLimit]);
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Vec<Command> {
        app.handle_event(AppEvent::Key(KeyEvent::from(code)))
    }

    fn load_generation(commands: &[Command]) -> u64 {
        match commands {
            [Command::LoadContributors { generation, .. }] => *generation,
            other => panic!("expected a single contributor load, got {other:?}"),
        }
    }

    #[test]
    fn test_repository_arrival_replaces_store_and_refreshes_quota() {
        let mut app = app_with_repos(vec![make_repo(1, "a"), make_repo(2, "b")]);
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.repo_selected, 0);

        // A later fetch replaces the store wholesale.
        let commands = app.handle_event(AppEvent::Repositories(Ok(vec![make_repo(9, "z")])));
        assert_eq!(commands, vec![Command::RefreshRateLimit]);
        assert_eq!(app.store.len(), 1);
        assert!(app.store.get("1").is_none());
        assert!(app.store.get("9").is_some());
    }

    #[test]
    fn test_selection_move_requests_contributors_for_new_selection() {
        let mut app = app_with_repos(vec![make_repo(1, "a"), make_repo(2, "b")]);

        let commands = press(&mut app, KeyCode::Char('j'));
        match &commands[..] {
            [Command::LoadContributors { url, .. }] => {
                assert_eq!(url, &make_repo(2, "b").contributors_url);
            }
            other => panic!("expected a contributor load, got {other:?}"),
        }
        assert!(app.contributors_loading);
    }

    #[test]
    fn test_selection_on_empty_store_is_silent() {
        let mut app = App::new(Config::default());
        assert!(press(&mut app, KeyCode::Char('j')).is_empty());
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert!(app.selected_repository().is_none());
    }

    #[test]
    fn test_stale_contributor_results_are_dropped() {
        let mut app = app_with_repos(vec![
            make_repo(1, "a"),
            make_repo(2, "b"),
            make_repo(3, "c"),
        ]);

        let first = load_generation(&press(&mut app, KeyCode::Char('j')));
        let second = load_generation(&press(&mut app, KeyCode::Char('j')));
        assert!(second > first);

        // The superseded response resolves late and is ignored.
        let commands = app.handle_event(AppEvent::Contributors {
            generation: first,
            result: Ok(vec![make_contributor("stale", 1)]),
        });
        assert!(commands.is_empty());
        assert!(app.contributors.is_empty());
        assert!(app.contributors_loading);

        // The current one lands and triggers a quota refresh.
        let commands = app.handle_event(AppEvent::Contributors {
            generation: second,
            result: Ok(vec![make_contributor("bob", 7)]),
        });
        assert_eq!(commands, vec![Command::RefreshRateLimit]);
        assert_eq!(app.contributors.len(), 1);
        assert!(!app.contributors_loading);
    }

    #[test]
    fn test_contributor_failure_is_reported_not_hung() {
        let mut app = app_with_repos(vec![make_repo(1, "a"), make_repo(2, "b")]);
        let generation = load_generation(&press(&mut app, KeyCode::Char('j')));

        let commands = app.handle_event(AppEvent::Contributors {
            generation,
            result: Err("boom".to_string()),
        });
        assert!(commands.is_empty());
        assert!(!app.contributors_loading);
        assert_eq!(app.last_sync, "error: boom");
    }

    #[test]
    fn test_enter_reloads_current_selection() {
        let mut app = app_with_repos(vec![make_repo(1, "a")]);
        let commands = press(&mut app, KeyCode::Enter);
        match &commands[..] {
            [Command::LoadContributors { url, .. }] => {
                assert_eq!(url, &make_repo(1, "a").contributors_url);
            }
            other => panic!("expected a contributor load, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_errors_surface_in_status_line() {
        let mut app = App::new(Config::default());
        app.handle_event(AppEvent::Repositories(Err("404 for url".to_string())));
        assert_eq!(app.last_sync, "error: 404 for url");
    }

    #[test]
    fn test_rate_limit_event_updates_display_state() {
        let mut app = App::new(Config::default());
        let window = RateWindow {
            limit: 60,
            remaining: 58,
            reset: 1_700_000_000,
        };
        assert!(app
            .handle_event(AppEvent::RateLimit(Ok(window)))
            .is_empty());
        assert_eq!(app.rate_limit, Some(window));
    }

    #[test]
    fn test_quit_and_help_keys() {
        let mut app = App::new(Config::default());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_refresh_requests_repositories() {
        let mut app = app_with_repos(vec![make_repo(1, "a")]);
        assert_eq!(
            press(&mut app, KeyCode::Char('r')),
            vec![Command::LoadRepositories]
        );
    }
}

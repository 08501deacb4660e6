use crate::github::types::{Contributor, RateWindow, Repository};
use crossterm::event::KeyEvent;

/// Everything the main loop can wake up on. Fetch completions carry their
/// outcome; errors arrive stringified so events stay cheap to move.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Repositories(Result<Vec<Repository>, String>),
    Contributors {
        generation: u64,
        result: Result<Vec<Contributor>, String>,
    },
    RateLimit(Result<RateWindow, String>),
}

/// Work the app asks the main loop to spawn. The app never touches the
/// network itself, which keeps its event handling synchronous and testable.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadRepositories,
    LoadContributors { url: String, generation: u64 },
    RefreshRateLimit,
}

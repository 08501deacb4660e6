mod app;
mod config;
mod error;
mod event;
mod github;
#[cfg(test)]
mod test_utils;
mod ui;

use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::{AppEvent, Command};
use futures::StreamExt;
use github::client::GitHubClient;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "orgscope",
    about = "TUI browser for a GitHub organization's repositories and contributors"
)]
struct Cli {
    #[arg(help = "Organization whose repositories to browse")]
    org: Option<String>,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.org);
    let client = GitHubClient::new(&config)?;
    let mut app = App::new(config);

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    // The contributors fetch also burns quota, so the quota report runs at
    // startup and again after every data fetch completes.
    run_command(Command::LoadRepositories, &client, &app.config.org, &tx);
    run_command(Command::RefreshRateLimit, &client, &app.config.org, &tx);

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    loop {
        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        let mut commands = app.handle_event(first);
        while let Ok(pending) = rx.try_recv() {
            commands.extend(app.handle_event(pending));
        }
        for command in commands {
            run_command(command, &client, &app.config.org, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn run_command(
    command: Command,
    client: &GitHubClient,
    org: &str,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let client = client.clone();
    let tx = tx.clone();
    match command {
        Command::LoadRepositories => {
            let org = org.to_string();
            tokio::spawn(async move {
                let result = client.list_org_repos(&org).await.map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::Repositories(result));
            });
        }
        Command::LoadContributors { url, generation } => {
            tokio::spawn(async move {
                let result = client
                    .fetch_contributors(&url)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::Contributors { generation, result });
            });
        }
        Command::RefreshRateLimit => {
            tokio::spawn(async move {
                let result = client.rate_limit().await.map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::RateLimit(result));
            });
        }
    }
}

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use conf_schedule::{
    app::ScheduleScreen,
    storage::config::Config,
    sync::sync_engine::SyncEngine,
    ui::theme::Theme,
};
use crate::tui::event_detail::presentation::DetailScroll;
use crate::tui::presentation::{ui, ViewOptions};

const LOADING_TICK: Duration = Duration::from_millis(100);
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub async fn run_tui(config: Config) -> Result<(), io::Error> {
    let engine = SyncEngine::new(&config)
        .map_err(|e| io::Error::other(e.to_string()))?;

    let view = ViewOptions {
        theme: Theme::get_by_name(&config.ui.theme),
        show_fetch_errors: config.ui.show_fetch_errors,
    };
    let mut screen = ScheduleScreen::new(config.ui.header.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut screen, &engine, &view).await;

    screen.dispose();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut ScheduleScreen,
    engine: &SyncEngine,
    view: &ViewOptions,
) -> io::Result<()> {
    let lifetime = screen.lifetime();
    let fetch = engine.load_until_cancelled(&lifetime);
    tokio::pin!(fetch);
    let mut fetch_pending = true;
    let mut detail_scroll = DetailScroll::default();

    loop {
        terminal.draw(|f| ui(f, screen, view, &mut detail_scroll))?;

        if fetch_pending {
            if let Ok(result) = tokio::time::timeout(LOADING_TICK, &mut fetch).await {
                fetch_pending = false;
                if let Some(result) = result
                    && let Some(outcome) = screen.settle(result)
                {
                    tracing::info!("Schedule settled: {:?}", outcome);
                }
                continue;
            }
        }

        let wait = if fetch_pending { Duration::ZERO } else { IDLE_POLL };
        if !event::poll(wait)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(key.code, screen, &mut detail_scroll) == KeyOutcome::Quit
        {
            screen.dispose();
            return Ok(());
        }
    }
}

pub fn handle_key(code: KeyCode, screen: &mut ScheduleScreen, detail_scroll: &mut DetailScroll) -> KeyOutcome {
    if screen.detail().is_some() {
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                screen.close_detail();
                detail_scroll.reset();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                detail_scroll.scroll_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                detail_scroll.scroll_up();
            }
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => screen.select_next(),
        KeyCode::Char('k') | KeyCode::Up => screen.select_previous(),
        KeyCode::Enter => {
            if screen.open_selected().is_some() {
                detail_scroll.reset();
            }
        }
        _ => {}
    }

    KeyOutcome::Continue
}

mod app;
mod domain;
mod infra;
mod ui;

use crate::app::{AppCommand, AppData, AppEvent, AppModel, RunState};
use crate::domain::{GameCatalog, format_clock};
use crate::infra::{
    ConfigError, DataPaths, LaunchError, LoadRecordError, ResolveDataDirError, SessionOutcome,
    discover_games, ensure_data_files, load_config, load_record, open_in_editor,
    resolve_data_dir, run_session, save_record,
};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    App(#[from] crate::app::AppError),

    #[error(transparent)]
    ResolveDataDir(#[from] ResolveDataDirError),

    #[error("failed to prepare data directory {path}: {source}")]
    Bootstrap {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Record(#[from] LoadRecordError),
}

fn main() {
    if let Err(error) = run_main() {
        tracing::error!(%error, "startup failed");
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), MainError> {
    let paths = DataPaths::under(resolve_data_dir()?);
    ensure_data_files(&paths).map_err(|source| MainError::Bootstrap {
        path: paths.root.display().to_string(),
        source,
    })?;
    init_logging(&paths.log);

    let (data, notice) = load_app_data(paths)?;
    tracing::info!(
        games = data.catalog.len(),
        records = data.record.len(),
        "library loaded"
    );

    let mut model = AppModel::new(data).with_notice(notice);
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut model);
    let restored = restore_terminal(&mut terminal);
    tracing::info!("bye");
    loop_outcome(result, restored)
}

/// A loop error wins over a failure to restore the terminal.
fn loop_outcome(
    result: Result<(), app::AppError>,
    restored: Result<(), app::AppError>,
) -> Result<(), MainError> {
    result?;
    Ok(restored?)
}

fn init_logging(log_path: &Path) {
    let filter = EnvFilter::try_from_env("TGC_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = OpenOptions::new().create(true).append(true).open(log_path);
    let _ = match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init(),
    };
}

/// Reads config and record, scans the game directories and builds the
/// catalog. A corrupt record aborts startup; a record value that is not a
/// clock is reset to zero so the record agrees with the catalog.
fn load_app_data(paths: DataPaths) -> Result<(AppData, Option<String>), MainError> {
    let config = load_config(&paths.config)?;
    let mut record = load_record(&paths.record)?;

    let discovered = discover_games(&config.directories);
    for dir in &discovered.missing_dirs {
        tracing::info!(dir = %dir.display(), "game directory not found, skipping");
    }

    let (catalog, rejected) = GameCatalog::build(discovered.games, &record);
    for entry in &rejected {
        tracing::warn!(
            title = %entry.title,
            error = %entry.error,
            "resetting recorded playtime"
        );
        record.set(&entry.title, 0);
    }

    let mut problems = Vec::new();
    if !rejected.is_empty() {
        problems.push(format!(
            "reset {} malformed playtime value(s) in {}",
            rejected.len(),
            paths.record.display()
        ));
    }
    if discovered.unreadable_entries > 0 {
        problems.push(format!(
            "skipped {} unreadable directory entr{}",
            discovered.unreadable_entries,
            if discovered.unreadable_entries == 1 { "y" } else { "ies" }
        ));
    }
    let notice = (!problems.is_empty()).then(|| format!("Startup: {}.", problems.join("; ")));

    Ok((
        AppData {
            paths,
            editor: config.editor,
            catalog,
            record,
        },
        notice,
    ))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, app::AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), app::AppError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
) -> Result<(), app::AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, model))?;

        let event = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
            Event::Resize(..) => AppEvent::Resize,
            _ => continue,
        };

        let (next, command) = app::update(model.clone(), event);
        *model = next;
        match command {
            AppCommand::None => {}
            AppCommand::Quit => return Ok(()),
            AppCommand::LaunchGame { index } => play_game(terminal, model, index)?,
            AppCommand::OpenInEditor { path } => edit_file(terminal, model, &path)?,
        }
    }
}

/// Hands the terminal to a foreground child and takes it back on drop.
struct SuspendTuiGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
}

impl<'a> SuspendTuiGuard<'a> {
    fn suspend(terminal: &'a mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<Self> {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        terminal.show_cursor()?;
        Ok(Self { terminal })
    }
}

impl Drop for SuspendTuiGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.hide_cursor();
        let _ = self.terminal.clear();
    }
}

fn play_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
    index: usize,
) -> io::Result<()> {
    let Some(entry) = model.data.catalog.get(index).cloned() else {
        model.run_state = RunState::Idle;
        return Ok(());
    };

    let result = {
        let _suspended = SuspendTuiGuard::suspend(terminal)?;
        {
            let mut out = io::stdout().lock();
            let _ = writeln!(
                out,
                "Playing {}. Playtime is recorded when the game exits.",
                entry.title
            );
            let _ = out.flush();
        }
        run_session(&entry, &model.prefix)
    };

    complete_session(model, result);
    Ok(())
}

/// Folds the running game's finished session into the model and rewrites the
/// record. A failed launch records nothing; a failed write keeps the
/// in-memory total.
fn complete_session(model: &mut AppModel, result: Result<SessionOutcome, LaunchError>) {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::warn!(%error, "launch failed");
            model.run_state = RunState::Idle;
            model.notice = Some(error.to_string());
            return;
        }
    };

    let Some((index, total)) = model.record_session(outcome.elapsed_secs) else {
        return;
    };
    let title = model
        .data
        .catalog
        .get(index)
        .map(|entry| entry.title.clone())
        .unwrap_or_default();

    let exit_note = match outcome.exit_code {
        Some(0) => String::new(),
        Some(code) => format!(", exited with code {code}"),
        None => ", killed by a signal".to_string(),
    };
    tracing::info!(
        %title,
        exit_code = ?outcome.exit_code,
        elapsed_secs = outcome.elapsed_secs,
        "session recorded"
    );

    match save_record(&model.data.paths.record, &model.data.record) {
        Ok(()) => {
            tracing::info!(%title, total = %format_clock(total), "playtime saved");
            model.notice = Some(format!(
                "Played {title} for {} (total {}{exit_note}).",
                format_clock(outcome.elapsed_secs),
                format_clock(total)
            ));
        }
        Err(error) => {
            tracing::error!(%title, %error, "playtime not saved");
            model.notice = Some(format!("Playtime kept in memory but not saved: {error}"));
        }
    }
}

fn edit_file(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
    path: &Path,
) -> io::Result<()> {
    let result = {
        let _suspended = SuspendTuiGuard::suspend(terminal)?;
        open_in_editor(&model.data.editor, path)
    };

    if let Err(error) = result {
        tracing::warn!(%error, "editor failed");
        model.notice = Some(error.to_string());
    }
    Ok(())
}

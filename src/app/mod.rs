mod line_editor;

use crate::domain::{GameCatalog, Navigation, PAGE_STEP, PlaytimeRecord, ROW_STEP, Tab};
use crate::infra::DataPaths;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use thiserror::Error;

pub use line_editor::LineEditor;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct AppData {
    pub paths: DataPaths,
    pub editor: String,
    pub catalog: GameCatalog,
    pub record: PlaytimeRecord,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunState {
    Idle,
    Running { index: usize },
}

#[derive(Clone, Debug)]
pub struct AppModel {
    pub data: AppData,
    pub nav: Navigation,
    pub prefix: String,
    pub prefix_editor: Option<LineEditor>,
    pub run_state: RunState,
    pub notice: Option<String>,
}

impl AppModel {
    pub fn new(data: AppData) -> Self {
        Self {
            data,
            nav: Navigation::default(),
            prefix: String::new(),
            prefix_editor: None,
            run_state: RunState::Idle,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    /// Folds a finished session into the running game's catalog entry and the
    /// record, and leaves the running state. Returns the game's index and its
    /// new total.
    pub fn record_session(&mut self, elapsed_secs: u64) -> Option<(usize, u64)> {
        let RunState::Running { index } = std::mem::replace(&mut self.run_state, RunState::Idle)
        else {
            return None;
        };
        let total = self.data.catalog.add_playtime(index, elapsed_secs)?;
        let title = self.data.catalog.get(index)?.title.clone();
        self.data.record.set(&title, total);
        Some((index, total))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    PrevTab,
    NextTab,
    RowUp,
    RowDown,
    PageUp,
    PageDown,
    Activate,
    EditPrefix,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('c' | 'q') if control => Action::Quit,
        KeyCode::Char('u') if control => Action::PageUp,
        KeyCode::Char('d') if control => Action::PageDown,
        _ if control => return None,
        KeyCode::Left | KeyCode::Char('h') => Action::PrevTab,
        KeyCode::Right | KeyCode::Char('l') => Action::NextTab,
        KeyCode::Up | KeyCode::Char('k') => Action::RowUp,
        KeyCode::Down | KeyCode::Char('j') => Action::RowDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char('e') => Action::EditPrefix,
        _ => return None,
    };
    Some(action)
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    LaunchGame { index: usize },
    OpenInEditor { path: PathBuf },
}

pub fn update(model: AppModel, event: AppEvent) -> (AppModel, AppCommand) {
    match event {
        AppEvent::Key(key) => update_on_key(model, key),
        AppEvent::Resize => (model, AppCommand::None),
    }
}

fn update_on_key(mut model: AppModel, key: KeyEvent) -> (AppModel, AppCommand) {
    if matches!(model.run_state, RunState::Running { .. }) {
        return (model, AppCommand::None);
    }

    if let Some(editor) = model.prefix_editor.take() {
        return update_prefix_editor(model, editor, key);
    }

    match action_for_key(key) {
        Some(action) => {
            model.notice = None;
            apply_action(model, action)
        }
        None => (model, AppCommand::None),
    }
}

fn apply_action(mut model: AppModel, action: Action) -> (AppModel, AppCommand) {
    let game_count = model.data.catalog.len();
    match action {
        Action::PrevTab => model.nav.move_tab(-1),
        Action::NextTab => model.nav.move_tab(1),
        Action::RowUp => model.nav.move_row(-ROW_STEP, game_count),
        Action::RowDown => model.nav.move_row(ROW_STEP, game_count),
        Action::PageUp => model.nav.move_row(-PAGE_STEP, game_count),
        Action::PageDown => model.nav.move_row(PAGE_STEP, game_count),
        Action::EditPrefix => {
            model.prefix_editor = Some(LineEditor::from_text(&model.prefix));
        }
        Action::Quit => return (model, AppCommand::Quit),
        Action::Activate => return activate_tab(model),
    }
    (model, AppCommand::None)
}

fn activate_tab(mut model: AppModel) -> (AppModel, AppCommand) {
    let command = match model.nav.tab {
        Tab::Games => {
            let index = model.nav.row;
            if model.data.catalog.get(index).is_none() {
                model.notice = Some("No games found. Add a directory in the config.".to_string());
                return (model, AppCommand::None);
            }
            model.run_state = RunState::Running { index };
            AppCommand::LaunchGame { index }
        }
        Tab::Record => AppCommand::OpenInEditor {
            path: model.data.paths.record.clone(),
        },
        Tab::Config => AppCommand::OpenInEditor {
            path: model.data.paths.config.clone(),
        },
        Tab::Help => AppCommand::OpenInEditor {
            path: model.data.paths.help.clone(),
        },
        Tab::Exit => AppCommand::Quit,
    };
    (model, command)
}

fn update_prefix_editor(
    mut model: AppModel,
    mut editor: LineEditor,
    key: KeyEvent,
) -> (AppModel, AppCommand) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('c' | 'q')) {
            return (model, AppCommand::Quit);
        }
        model.prefix_editor = Some(editor);
        return (model, AppCommand::None);
    }

    match key.code {
        KeyCode::Enter => {
            model.prefix = editor.into_text();
            return (model, AppCommand::None);
        }
        KeyCode::Esc => return (model, AppCommand::None),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        KeyCode::Char(character) => editor.insert_char(character),
        _ => {}
    }

    model.prefix_editor = Some(editor);
    (model, AppCommand::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiscoveredGame;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn model_with_games(titles: &[&str]) -> AppModel {
        let discovered = titles
            .iter()
            .map(|title| DiscoveredGame {
                title: (*title).to_string(),
                path: PathBuf::from(format!("/games/{title}")),
            })
            .collect();
        let (catalog, _) = GameCatalog::build(discovered, &PlaytimeRecord::default());
        AppModel::new(AppData {
            paths: DataPaths::under(PathBuf::from("/tmp/tgc")),
            editor: "vi".to_string(),
            catalog,
            record: PlaytimeRecord::default(),
        })
    }

    fn press(model: AppModel, events: &[AppEvent]) -> (AppModel, AppCommand) {
        let mut model = model;
        let mut command = AppCommand::None;
        for event in events {
            let (next, next_command) = update(model, event.clone());
            model = next;
            command = next_command;
        }
        (model, command)
    }

    #[test]
    fn vi_keys_and_arrows_map_to_the_same_actions() {
        let pairs = [
            (KeyCode::Left, KeyCode::Char('h'), Action::PrevTab),
            (KeyCode::Right, KeyCode::Char('l'), Action::NextTab),
            (KeyCode::Up, KeyCode::Char('k'), Action::RowUp),
            (KeyCode::Down, KeyCode::Char('j'), Action::RowDown),
        ];
        for (arrow, vi, action) in pairs {
            let arrow = KeyEvent::new(arrow, KeyModifiers::NONE);
            let vi = KeyEvent::new(vi, KeyModifiers::NONE);
            assert_eq!(action_for_key(arrow), Some(action));
            assert_eq!(action_for_key(vi), Some(action));
        }

        let page_down = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let page_up = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(page_down), Some(Action::PageDown));
        assert_eq!(action_for_key(page_up), Some(Action::PageUp));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn enter_on_games_launches_selected_row() {
        let model = model_with_games(&["b", "A", "c"]);
        let (model, command) = press(model, &[key(KeyCode::Char('j')), key(KeyCode::Enter)]);

        assert_eq!(command, AppCommand::LaunchGame { index: 1 });
        assert_eq!(model.run_state, RunState::Running { index: 1 });
    }

    #[test]
    fn input_is_ignored_while_running() {
        let model = model_with_games(&["a", "b"]);
        let (model, _) = press(model, &[key(KeyCode::Enter)]);
        let (model, command) = press(
            model,
            &[key(KeyCode::Down), key(KeyCode::Right), ctrl('c'), key(KeyCode::Enter)],
        );

        assert_eq!(command, AppCommand::None);
        assert_eq!(model.nav, Navigation::default());
    }

    #[test]
    fn record_session_updates_catalog_and_record() {
        let model = model_with_games(&["Chess"]);
        let (mut model, _) = press(model, &[key(KeyCode::Enter)]);

        assert_eq!(model.record_session(75), Some((0, 75)));
        assert_eq!(model.run_state, RunState::Idle);
        assert_eq!(model.data.record.get("Chess"), Some("00:01:15"));
    }

    #[test]
    fn duplicate_titles_overwrite_the_shared_record_key() {
        let model = model_with_games(&["Doom", "Doom"]);
        let (mut model, _) = press(model, &[key(KeyCode::Enter)]);
        assert_eq!(model.record_session(10), Some((0, 10)));

        let (mut model, _) = press(model, &[key(KeyCode::Down), key(KeyCode::Enter)]);
        assert_eq!(model.record_session(3), Some((1, 3)));

        assert_eq!(model.data.catalog.get(0).map(|entry| entry.playtime_secs), Some(10));
        assert_eq!(model.data.record.get("Doom"), Some("00:00:03"));
    }

    #[test]
    fn record_session_needs_a_running_game() {
        let mut model = model_with_games(&["Chess"]);
        assert_eq!(model.record_session(75), None);
        assert_eq!(model.data.record.get("Chess"), None);
    }

    #[test]
    fn enter_with_no_games_shows_hint() {
        let model = model_with_games(&[]);
        let (model, command) = press(
            model,
            &[key(KeyCode::Down), key(KeyCode::PageDown), key(KeyCode::Enter)],
        );

        assert_eq!(command, AppCommand::None);
        assert_eq!(model.nav.row, 0);
        assert_eq!(model.run_state, RunState::Idle);
        assert!(model.notice.is_some());
    }

    #[test]
    fn file_tabs_open_the_editor_and_exit_quits() {
        let model = model_with_games(&["a"]);
        let (model, command) = press(model, &[key(KeyCode::Right), key(KeyCode::Enter)]);
        assert_eq!(
            command,
            AppCommand::OpenInEditor {
                path: model.data.paths.record.clone()
            }
        );

        let (model, command) = press(model, &[key(KeyCode::Char('l')), key(KeyCode::Enter)]);
        assert_eq!(
            command,
            AppCommand::OpenInEditor {
                path: model.data.paths.config.clone()
            }
        );

        let (model, command) = press(model, &[key(KeyCode::Char('l')), key(KeyCode::Enter)]);
        assert_eq!(
            command,
            AppCommand::OpenInEditor {
                path: model.data.paths.help.clone()
            }
        );

        let (_, command) = press(model, &[key(KeyCode::Char('l')), key(KeyCode::Enter)]);
        assert_eq!(command, AppCommand::Quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_tab() {
        let (_, command) = press(model_with_games(&["a"]), &[ctrl('c')]);
        assert_eq!(command, AppCommand::Quit);
    }

    #[test]
    fn prefix_editor_captures_keys_until_enter() {
        let model = model_with_games(&["a", "b"]);
        let mut events = vec![key(KeyCode::Char('e'))];
        events.extend("wine64 j".chars().map(|ch| key(KeyCode::Char(ch))));
        events.push(key(KeyCode::Backspace));
        let (model, command) = press(model, &events);

        assert_eq!(command, AppCommand::None);
        assert_eq!(model.nav.row, 0);
        assert_eq!(model.prefix, "");
        assert_eq!(
            model.prefix_editor.as_ref().map(LineEditor::text),
            Some("wine64 ")
        );

        let (model, _) = press(model, &[key(KeyCode::Enter)]);
        assert_eq!(model.prefix, "wine64 ");
        assert!(model.prefix_editor.is_none());
    }

    #[test]
    fn prefix_editor_escape_keeps_old_prefix() {
        let mut model = model_with_games(&["a"]);
        model.prefix = "gamemoderun ".to_string();
        let (model, _) = press(
            model,
            &[
                key(KeyCode::Char('e')),
                key(KeyCode::Backspace),
                key(KeyCode::Esc),
            ],
        );

        assert_eq!(model.prefix, "gamemoderun ");
        assert!(model.prefix_editor.is_none());
    }

    #[test]
    fn resize_keeps_navigation() {
        let model = model_with_games(&["a", "b", "c"]);
        let (model, _) = press(model, &[key(KeyCode::Down), key(KeyCode::Right)]);
        let before = model.nav;
        let (model, command) = update(model, AppEvent::Resize);

        assert_eq!(command, AppCommand::None);
        assert_eq!(model.nav, before);
    }
}

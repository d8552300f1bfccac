use std::ops::Range;

pub const ROW_STEP: isize = 1;
pub const PAGE_STEP: isize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tab {
    Games,
    Record,
    Config,
    Help,
    Exit,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Games, Tab::Record, Tab::Config, Tab::Help, Tab::Exit];

    pub fn label(self) -> &'static str {
        match self {
            Self::Games => "Games",
            Self::Record => "Record",
            Self::Config => "Config",
            Self::Help => "Help",
            Self::Exit => "Exit",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Games => 0,
            Self::Record => 1,
            Self::Config => 2,
            Self::Help => 3,
            Self::Exit => 4,
        }
    }
}

/// Active tab plus the active row of the games list. Both moves clamp at the
/// ends; nothing wraps around.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Navigation {
    pub tab: Tab,
    pub row: usize,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            tab: Tab::Games,
            row: 0,
        }
    }
}

impl Navigation {
    pub fn move_tab(&mut self, delta: isize) {
        let last = Tab::ALL.len() - 1;
        let next = clamp_offset(self.tab.index(), delta, last);
        self.tab = Tab::ALL[next];
    }

    /// No-op when there are no games.
    pub fn move_row(&mut self, delta: isize, game_count: usize) {
        if game_count == 0 {
            return;
        }
        self.row = clamp_offset(self.row, delta, game_count - 1);
    }
}

fn clamp_offset(current: usize, delta: isize, max: usize) -> usize {
    let current = current.min(max);
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta.unsigned_abs()).min(max)
    }
}

/// Rows of the page that contains `row`. Pages are fixed windows of
/// `page_size` rows starting at multiples of `page_size`.
pub fn page_window(row: usize, page_size: usize, game_count: usize) -> Range<usize> {
    if page_size == 0 || game_count == 0 {
        return 0..0;
    }
    let row = row.min(game_count - 1);
    let start = (row / page_size) * page_size;
    let end = start.saturating_add(page_size).min(game_count);
    start..end
}

//! Row-descriptor menus with hover, commit and toggle debounce
//!
//! Menu-bearing screens rebuild their row list every frame (the options list
//! depends on whether a run is in progress), hit-test the live pointer for
//! hover and the release point for commits, and apply committed actions
//! through the collaborator ports. Options toggles share one [`Debounce`]
//! clock so a bouncing finger cannot flip a setting twice.

use glam::Vec2;
use log::warn;

use crate::collab::Collaborators;
use crate::consts::{
    MENU_FIRST_ROW_Y, MENU_ROW_HEIGHT, OPTIONS_DEBOUNCE_SEC, OPTIONS_FIRST_ROW_Y,
    OPTIONS_ROW_BAND_BIAS, OPTIONS_ROW_BAND_H, OPTIONS_ROW_SPACING, OPTIONS_SECOND_GROUP_Y,
    PAUSE_ROW_SPACING, SCREEN_WIDTH,
};
use crate::geometry::{Region, RowLayout};

/// Store search used by the "find more games" row
pub const STORE_SEARCH_TERMS: &str = "improvisoft";

/// One selectable menu row: its label, draw baseline, hit band and action
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow<A> {
    pub label: String,
    pub baseline_y: f32,
    pub region: Region,
    pub action: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuAction {
    StartGame,
    Options,
    Credits,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsAction {
    FlipDisplaySide,
    ToggleMusic,
    CycleDifficulty,
    ToggleAutoSelect,
    RateReview,
    FindMoreGames,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    MainMenu,
    Quit,
}

/// Index of the first row whose hit band contains the live pointer
pub fn hover_index<A>(rows: &[MenuRow<A>], live: Option<Vec2>) -> Option<usize> {
    let pt = live?;
    rows.iter().position(|row| row.region.contains(pt))
}

/// Action of the row the release point landed in, if any
pub fn committed<A: Copy>(rows: &[MenuRow<A>], release: Option<Vec2>) -> Option<A> {
    let pt = release?;
    rows.iter().find(|row| row.region.contains(pt)).map(|row| row.action)
}

/// The five main-menu rows, in draw order
pub fn main_menu_rows() -> Vec<MenuRow<MainMenuAction>> {
    const ENTRIES: [(&str, MainMenuAction); 5] = [
        ("START GAME", MainMenuAction::StartGame),
        ("OPTIONS", MainMenuAction::Options),
        ("CREDITS", MainMenuAction::Credits),
        ("HELP", MainMenuAction::Help),
        ("QUIT", MainMenuAction::Quit),
    ];
    let layout = RowLayout {
        first_y: MENU_FIRST_ROW_Y,
        spacing: MENU_ROW_HEIGHT,
        band_height: MENU_ROW_HEIGHT,
        band_bias: 0.0,
        width: SCREEN_WIDTH,
    };
    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, &(label, action))| MenuRow {
            label: label.to_string(),
            baseline_y: MENU_FIRST_ROW_Y + MENU_ROW_HEIGHT * i as f32,
            region: layout.row(i),
            action,
        })
        .collect()
}

/// Options rows for this frame
///
/// The display-side row only exists outside a run (the panel cannot move
/// mid-game), and later first-group rows shift up to fill its slot. The two
/// store rows sit in a fixed second group below.
pub fn options_rows(
    collab: &Collaborators<'_>,
    game_in_progress: bool,
) -> Vec<MenuRow<OptionsAction>> {
    let layout = RowLayout {
        first_y: OPTIONS_FIRST_ROW_Y,
        spacing: OPTIONS_ROW_SPACING,
        band_height: OPTIONS_ROW_BAND_H,
        band_bias: OPTIONS_ROW_BAND_BIAS,
        width: SCREEN_WIDTH,
    };
    let mut rows = Vec::with_capacity(6);
    let mut push = |rows: &mut Vec<MenuRow<OptionsAction>>, label: String, action| {
        let i = rows.len();
        rows.push(MenuRow {
            label,
            baseline_y: OPTIONS_FIRST_ROW_Y + OPTIONS_ROW_SPACING * i as f32,
            region: layout.row(i),
            action,
        });
    };

    if !game_in_progress {
        push(
            &mut rows,
            format!("SCOREBOARD: {}", collab.scoreboard.display_side.as_str()),
            OptionsAction::FlipDisplaySide,
        );
    }
    push(
        &mut rows,
        format!("MUSIC: {}", if collab.audio.music_enabled() { "ON" } else { "OFF" }),
        OptionsAction::ToggleMusic,
    );
    push(
        &mut rows,
        format!("DIFFICULTY: {}", collab.scoreboard.difficulty.as_str()),
        OptionsAction::CycleDifficulty,
    );
    push(
        &mut rows,
        format!(
            "AUTO-SELECT WEAPON: {}",
            if collab.ship.auto_select_weapon() { "YES" } else { "NO" }
        ),
        OptionsAction::ToggleAutoSelect,
    );

    rows.push(MenuRow {
        label: "RATE & REVIEW".to_string(),
        baseline_y: OPTIONS_SECOND_GROUP_Y,
        region: layout.row_at(OPTIONS_SECOND_GROUP_Y),
        action: OptionsAction::RateReview,
    });
    rows.push(MenuRow {
        label: "FIND MORE GAMES".to_string(),
        baseline_y: OPTIONS_SECOND_GROUP_Y + OPTIONS_ROW_SPACING,
        region: layout.row_at(OPTIONS_SECOND_GROUP_Y + OPTIONS_ROW_SPACING),
        action: OptionsAction::FindMoreGames,
    });
    rows
}

/// The three pause-screen rows
pub fn pause_rows() -> Vec<MenuRow<PauseAction>> {
    const ENTRIES: [(&str, PauseAction); 3] = [
        ("RESUME GAME", PauseAction::Resume),
        ("MAIN MENU", PauseAction::MainMenu),
        ("QUIT", PauseAction::Quit),
    ];
    let layout = RowLayout {
        first_y: OPTIONS_FIRST_ROW_Y,
        spacing: PAUSE_ROW_SPACING,
        band_height: OPTIONS_ROW_BAND_H,
        band_bias: OPTIONS_ROW_BAND_BIAS,
        width: SCREEN_WIDTH,
    };
    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, &(label, action))| MenuRow {
            label: label.to_string(),
            baseline_y: OPTIONS_FIRST_ROW_Y + PAUSE_ROW_SPACING * i as f32,
            region: layout.row(i),
            action,
        })
        .collect()
}

/// Shared cool-down between accepted options commits
///
/// Starts saturated so the first commit after screen entry always lands.
/// Only an accepted commit rewinds the clock; a release that misses every
/// row, or arrives too early, leaves it running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    since_accept_sec: f32,
}

impl Default for Debounce {
    fn default() -> Self {
        Self { since_accept_sec: 60.0 }
    }
}

impl Debounce {
    pub fn tick(&mut self, dt_sec: f32) {
        self.since_accept_sec += dt_sec;
    }

    pub fn ready(&self) -> bool {
        self.since_accept_sec > OPTIONS_DEBOUNCE_SEC
    }

    /// Record an accepted commit
    pub fn accept(&mut self) {
        self.since_accept_sec = 0.0;
    }
}

/// Apply a committed options action through the ports
///
/// Platform rows are best-effort: a failure is logged and swallowed, the
/// screen state never changes because of it.
pub fn apply_options_action(action: OptionsAction, collab: &mut Collaborators<'_>) {
    match action {
        OptionsAction::FlipDisplaySide => {
            collab.scoreboard.display_side = collab.scoreboard.display_side.flipped();
        }
        OptionsAction::ToggleMusic => {
            let enabled = !collab.audio.music_enabled();
            collab.audio.set_music_enabled(enabled);
            if enabled {
                collab.audio.play_music();
            } else if collab.audio.music_playing() {
                collab.audio.stop_music();
            }
        }
        OptionsAction::CycleDifficulty => {
            collab.scoreboard.difficulty = collab.scoreboard.difficulty.next();
        }
        OptionsAction::ToggleAutoSelect => {
            let enabled = !collab.ship.auto_select_weapon();
            collab.ship.set_auto_select_weapon(enabled);
        }
        OptionsAction::RateReview => {
            if let Err(err) = collab.platform.open_review() {
                warn!("review page unavailable: {err}");
            }
        }
        OptionsAction::FindMoreGames => {
            if let Err(err) = collab.platform.open_store_search(STORE_SEARCH_TERMS) {
                warn!("store search unavailable: {err}");
            }
        }
    }
}

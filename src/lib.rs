//! Invaders Core - screen flow and input orchestration for a 2D arcade shooter
//!
//! Core modules:
//! - `flow`: Screen state machine and the per-frame `update`/`draw` entry points
//! - `input`: Pointer/gesture/tilt normalization into per-frame snapshots
//! - `arbiter`: Gameplay input arbitration (gestures vs. tilt, skid rules)
//! - `menu`: Row-descriptor menus with hover, commit and toggle debounce
//! - `geometry`: Inclusive rectangular hit testing and row layout
//! - `timer`: Wall-clock screen timers and blink cadence
//! - `collab`: Narrow ports to the externally-owned ship, managers and audio
//! - `draw`: Per-frame draw plan (text, cursor, blink prompts) for the host
//!
//! The crate is headless. The hosting loop owns the window, renderer, audio
//! backend and entity simulations; it calls [`flow::GameFlow::update`] and
//! [`flow::GameFlow::draw`] exactly once per frame each.

pub mod arbiter;
pub mod collab;
pub mod draw;
pub mod flow;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod timer;

pub use collab::{Collaborators, Difficulty, DisplaySide, Scoreboard, ShipState, Weapon};
pub use flow::{GameFlow, Screen};
pub use input::{GestureEvent, InputSnapshot, RawFrame, TouchPhase, TouchSample};

/// Game configuration constants
pub mod consts {
    /// Virtual screen width (landscape)
    pub const SCREEN_WIDTH: f32 = 800.0;
    /// Virtual screen height
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Level-intro screen duration before gameplay resumes (ms)
    pub const LEVEL_INTRO_MS: u64 = 3000;
    /// Credits screen auto-return timeout (ms)
    pub const CREDITS_TIMEOUT_MS: u64 = 30_000;
    /// Help screen auto-return timeout (ms)
    pub const HELP_TIMEOUT_MS: u64 = 30_000;
    /// Blink period for "press back" / "tap to continue" prompts (ms)
    pub const BLINK_PERIOD_MS: u64 = 800;
    /// Grace added to the help timer on entry (ms)
    pub const HELP_ENTRY_GRACE_MS: u64 = 20;
    /// Grace before options timers count when entered via a held gesture (ms)
    pub const HOLD_OPTIONS_GRACE_MS: u64 = 500;

    /// Main menu: y of the first row
    pub const MENU_FIRST_ROW_Y: f32 = 260.0;
    /// Main menu: row height
    pub const MENU_ROW_HEIGHT: f32 = 40.0;
    /// Main menu: label column x
    pub const MENU_LABEL_X: f32 = 130.0;
    /// Main menu: cursor sprite x
    pub const MENU_CURSOR_X: f32 = 75.0;
    /// Main menu: cursor animation frame count
    pub const MENU_CURSOR_FRAMES: u8 = 20;

    /// Options: y of the first row
    pub const OPTIONS_FIRST_ROW_Y: f32 = 110.0;
    /// Options: vertical spacing between rows
    pub const OPTIONS_ROW_SPACING: f32 = 45.0;
    /// Options: y of the second row group (store rows), 110 + 9*45/2 truncated
    pub const OPTIONS_SECOND_GROUP_Y: f32 = 312.0;
    /// Options: hit band height around a row's baseline
    pub const OPTIONS_ROW_BAND_H: f32 = 40.0;
    /// Options: hit band starts this far above the row baseline
    pub const OPTIONS_ROW_BAND_BIAS: f32 = 10.0;
    /// Options: debounce window between accepted toggle commits (seconds)
    pub const OPTIONS_DEBOUNCE_SEC: f32 = 0.5;

    /// Pause: vertical spacing between rows
    pub const PAUSE_ROW_SPACING: f32 = 50.0;

    /// Help: x of the sample pickup column
    pub const HELP_PICKUP_X: f32 = 240.0;
    /// Help: x of the pickup label column
    pub const HELP_LABEL_X: f32 = 280.0;
    /// Help: y of the first pickup row
    pub const HELP_PICKUP_FIRST_Y: f32 = 110.0;
    /// Help: pickup row spacing
    pub const HELP_PICKUP_SPACING: f32 = 30.0;

    /// Tilt: deadzone half-width around neutral
    pub const TILT_DEADZONE: f32 = 0.1;
    /// Tilt: threshold for the faster speed step
    pub const TILT_STRONG: f32 = 0.2;
    /// Speed step for strong tilt and flicks
    pub const STEP_FAST: i32 = 4;
    /// Speed step for gentle tilt
    pub const STEP_SLOW: i32 = 2;
    /// Ship speed magnitude above which a reversal skids
    pub const SKID_SPEED: i32 = 2;
    /// Minimum interval between tilt-neutral damping steps (seconds)
    pub const SETTLE_INTERVAL_SEC: f32 = 1.0;
}

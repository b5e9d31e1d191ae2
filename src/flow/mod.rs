//! Screen state machine and per-frame entry points
//!
//! [`GameFlow`] owns the current screen tag, the screen-entry timer, the
//! input normalizer and the gameplay arbiter. The host calls
//! [`GameFlow::update`] once per frame with the raw input and its
//! collaborators, then [`GameFlow::draw`] to obtain the frame's draw plan.
//!
//! Screen behavior lives in one handler type per screen (see [`screens`]);
//! this module only sequences them: boundary hygiene first, then the
//! back-button, then the screen's input handler, then its automatic exits.

mod screens;

use log::debug;

use crate::arbiter::Arbiter;
use crate::collab::{Collaborators, SoundCue};
use crate::consts::{CREDITS_TIMEOUT_MS, HELP_TIMEOUT_MS, LEVEL_INTRO_MS};
use crate::draw::FramePlan;
use crate::input::{GestureSet, Normalizer, RawFrame};
use crate::menu::Debounce;
use crate::timer::{ArmedTimer, Millis};

use screens::handler;

/// Tag for each screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Options,
    LevelIntro,
    Gameplay,
    GameOver,
    Credits,
    Help,
    Pause,
}

impl Screen {
    /// Gesture kinds this screen wants recognized
    pub fn gesture_set(self) -> GestureSet {
        match self {
            Screen::Gameplay => {
                GestureSet::TAP | GestureSet::DRAG | GestureSet::FLICK | GestureSet::HOLD
            }
            Screen::MainMenu
            | Screen::Options
            | Screen::Credits
            | Screen::Help
            | Screen::Pause => GestureSet::TAP,
            Screen::LevelIntro | Screen::GameOver => GestureSet::empty(),
        }
    }

    /// Wall-clock timeout armed at entry, if the screen has one
    fn timeout(self) -> Option<Millis> {
        match self {
            Screen::LevelIntro => Some(LEVEL_INTRO_MS),
            Screen::Credits => Some(CREDITS_TIMEOUT_MS),
            Screen::Help => Some(HELP_TIMEOUT_MS),
            _ => None,
        }
    }
}

/// A requested screen change with its entry-timer grace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    to: Screen,
    grace: Millis,
}

impl Transition {
    fn to(screen: Screen) -> Self {
        Self { to: screen, grace: 0 }
    }

    fn with_grace(screen: Screen, grace: Millis) -> Self {
        Self { to: screen, grace }
    }
}

/// The orchestrator: screen tag, timers, input state and menu state
#[derive(Debug)]
pub struct GameFlow {
    screen: Screen,
    /// Screen as of the previous frame, for boundary detection
    prev_frame_screen: Screen,
    /// Armed fresh at every screen entry
    timer: ArmedTimer,
    normalizer: Normalizer,
    arbiter: Arbiter,
    /// Main-menu cursor row, persists across screen changes
    last_choice: usize,
    /// Row under the live pointer this frame, transient
    hover: Option<usize>,
    debounce: Debounce,
    game_in_progress: bool,
    exit_requested: bool,
    cursor_frame: u8,
}

impl GameFlow {
    pub fn new(now: Millis) -> Self {
        Self {
            screen: Screen::MainMenu,
            prev_frame_screen: Screen::MainMenu,
            timer: ArmedTimer::arm(now, None),
            normalizer: Normalizer::new(Screen::MainMenu.gesture_set()),
            arbiter: Arbiter::default(),
            last_choice: 0,
            hover: None,
            debounce: Debounce::default(),
            game_in_progress: false,
            exit_requested: false,
            cursor_frame: 0,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.screen
    }

    pub fn game_in_progress(&self) -> bool {
        self.game_in_progress
    }

    /// True once the player has asked to leave; the host tears down
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Advance one frame
    ///
    /// Boundary hygiene runs first when the screen changed since the last
    /// frame: the gesture queue is drained, the enabled-gesture set follows
    /// the new screen, and a touch still in progress arms the
    /// wait-for-release latch. The back-button preempts all pointer input.
    pub fn update(&mut self, raw: &RawFrame, collab: &mut Collaborators<'_>) {
        let boundary = self.screen != self.prev_frame_screen;
        if boundary {
            self.normalizer.rearm(self.screen.gesture_set(), !raw.touches.is_empty());
            self.prev_frame_screen = self.screen;
        }

        self.hover = None;

        if raw.back_pressed {
            self.handle_back(raw.now, collab);
        } else if let Some(snap) = self.normalizer.snapshot(raw, boundary) {
            if let Some(t) = handler(self.screen).handle_input(self, &snap, raw.dt_sec, collab) {
                self.apply(t, raw.now, collab);
            }
        }

        // Automatic exits run even on back-button and latched frames
        if let Some(t) = handler(self.screen).update(self, raw.now, collab) {
            self.apply(t, raw.now, collab);
        }
    }

    /// Describe the current frame for the host renderer
    pub fn draw(&mut self, now: Millis, collab: &Collaborators<'_>) -> FramePlan {
        handler(self.screen).draw_plan(self, now, collab)
    }

    fn apply(&mut self, t: Transition, now: Millis, collab: &mut Collaborators<'_>) {
        debug!("screen {:?} -> {:?}", self.screen, t.to);
        self.screen = t.to;
        self.timer = ArmedTimer::arm_with_grace(now, t.to.timeout(), t.grace);
        handler(t.to).on_enter(self, collab);
    }

    fn handle_back(&mut self, now: Millis, collab: &mut Collaborators<'_>) {
        match self.screen {
            Screen::MainMenu => self.exit_requested = true,
            Screen::Gameplay => self.apply(Transition::to(Screen::Pause), now, collab),
            Screen::Pause => self.apply(Transition::to(Screen::Gameplay), now, collab),
            Screen::Options => {
                let target =
                    if self.game_in_progress { Screen::Gameplay } else { Screen::MainMenu };
                self.apply(Transition::to(target), now, collab);
            }
            _ => self.apply(Transition::to(Screen::MainMenu), now, collab),
        }
    }

    /// Begin a fresh run from the main menu
    fn start_game(&mut self, collab: &mut Collaborators<'_>) {
        self.game_in_progress = true;
        self.arbiter = Arbiter::default();
        collab.scoreboard.score = 0;
        collab.scoreboard.wave = 1;
        collab.ship.reset();
        self.init_level(1, collab);
        collab.audio.play(SoundCue::MenuTap);
    }

    /// Stage `level`: clear the field and hand the level to the managers
    fn init_level(&mut self, level: u32, collab: &mut Collaborators<'_>) {
        collab.scoreboard.level = level;
        collab.bullets.reset();
        collab.hazards.reset();
        collab.pickups.reset();
        collab.ship.init_level();
        collab.hazards.set_level(level);
        collab.hazards.init_level(level);
    }
}

//! One handler type per screen
//!
//! Each screen implements [`ScreenHandler`]: entry side effects, pointer
//! handling, automatic exits and draw-plan preparation. [`handler`] is the
//! dispatch table keyed by the screen tag.

use glam::Vec2;

use super::{GameFlow, Screen, Transition};
use crate::collab::{Collaborators, PickupKind, ShipState, SoundCue};
use crate::consts::{
    HELP_ENTRY_GRACE_MS, HELP_LABEL_X, HELP_PICKUP_FIRST_Y, HELP_PICKUP_SPACING, HELP_PICKUP_X,
    HOLD_OPTIONS_GRACE_MS, MENU_CURSOR_FRAMES, MENU_LABEL_X, SCREEN_WIDTH,
};
use crate::draw::{self, Background, FramePlan, Layers, MenuCursor, TextItem};
use crate::input::InputSnapshot;
use crate::menu::{self, MainMenuAction, PauseAction};
use crate::timer::{BlinkStyle, Millis};

const CENTER_X: f32 = SCREEN_WIDTH / 2.0;

pub(super) trait ScreenHandler {
    /// Entry side effects, run once when the screen becomes current
    fn on_enter(&self, _flow: &mut GameFlow, _collab: &mut Collaborators<'_>) {}

    /// React to this frame's input snapshot
    fn handle_input(
        &self,
        _flow: &mut GameFlow,
        _snap: &InputSnapshot,
        _dt_sec: f32,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        None
    }

    /// Input-independent exit conditions, evaluated every frame
    fn update(
        &self,
        _flow: &mut GameFlow,
        _now: Millis,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        None
    }

    /// Describe the frame for the host renderer
    fn draw_plan(&self, flow: &mut GameFlow, now: Millis, collab: &Collaborators<'_>) -> FramePlan;
}

/// Dispatch table keyed by the screen tag
pub(super) fn handler(screen: Screen) -> &'static dyn ScreenHandler {
    match screen {
        Screen::MainMenu => &MainMenuScreen,
        Screen::Options => &OptionsScreen,
        Screen::LevelIntro => &LevelIntroScreen,
        Screen::Gameplay => &GameplayScreen,
        Screen::GameOver => &GameOverScreen,
        Screen::Credits => &CreditsScreen,
        Screen::Help => &HelpScreen,
        Screen::Pause => &PauseScreen,
    }
}

pub(super) struct MainMenuScreen;

impl ScreenHandler for MainMenuScreen {
    fn on_enter(&self, flow: &mut GameFlow, collab: &mut Collaborators<'_>) {
        flow.game_in_progress = false;
        collab.bullets.reset();
        collab.hazards.reset();
        collab.pickups.reset();
        collab.ship.reset();
    }

    fn handle_input(
        &self,
        flow: &mut GameFlow,
        snap: &InputSnapshot,
        _dt_sec: f32,
        collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        let rows = menu::main_menu_rows();

        if let Some(pt) = snap.release {
            let i = rows.iter().position(|row| row.region.contains(pt))?;
            flow.last_choice = i;
            return match rows[i].action {
                MainMenuAction::StartGame => {
                    flow.start_game(collab);
                    Some(Transition::to(Screen::Gameplay))
                }
                MainMenuAction::Options => Some(Transition::to(Screen::Options)),
                MainMenuAction::Credits => Some(Transition::to(Screen::Credits)),
                MainMenuAction::Help => {
                    Some(Transition::with_grace(Screen::Help, HELP_ENTRY_GRACE_MS))
                }
                MainMenuAction::Quit => {
                    flow.exit_requested = true;
                    None
                }
            };
        }

        // Hovering moves the cursor without committing
        if let Some(i) = menu::hover_index(&rows, snap.live) {
            flow.last_choice = i;
        }
        None
    }

    fn draw_plan(&self, flow: &mut GameFlow, _now: Millis, _collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Title);
        for row in menu::main_menu_rows() {
            plan.push(TextItem::new(row.label, Vec2::new(MENU_LABEL_X, row.baseline_y), 2.0));
        }
        plan.push(draw::version_corner());
        plan.cursor = Some(MenuCursor { row: flow.last_choice, frame: flow.cursor_frame });
        flow.cursor_frame = (flow.cursor_frame + 1) % MENU_CURSOR_FRAMES;
        plan
    }
}

pub(super) struct OptionsScreen;

impl ScreenHandler for OptionsScreen {
    fn handle_input(
        &self,
        flow: &mut GameFlow,
        snap: &InputSnapshot,
        dt_sec: f32,
        collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        flow.debounce.tick(dt_sec);

        let rows = menu::options_rows(collab, flow.game_in_progress);
        if snap.live.is_some() {
            flow.hover = menu::hover_index(&rows, snap.live);
        } else if flow.debounce.ready() {
            if let Some(action) = menu::committed(&rows, snap.release) {
                menu::apply_options_action(action, collab);
                flow.debounce.accept();
            }
        }
        None
    }

    fn draw_plan(&self, flow: &mut GameFlow, now: Millis, collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Black);
        plan.push(TextItem::centered("OPTIONS", Vec2::new(CENTER_X, 40.0), 2.0));

        for (i, row) in menu::options_rows(collab, flow.game_in_progress).into_iter().enumerate() {
            let item = TextItem::centered(row.label, Vec2::new(CENTER_X, row.baseline_y), 1.5);
            plan.push(if flow.hover == Some(i) { item } else { item.dim() });
        }

        if BlinkStyle::TwoOfThree.visible(flow.timer.elapsed(now)) {
            plan.push(TextItem::centered("PRESS BACK", Vec2::new(CENTER_X, 420.0), 1.0));
            let line = if flow.game_in_progress {
                "TO RESUME GAME"
            } else {
                "TO RETURN TO MAIN MENU"
            };
            plan.push(TextItem::centered(line, Vec2::new(CENTER_X, 450.0), 1.0));
        }
        plan
    }
}

pub(super) struct LevelIntroScreen;

impl ScreenHandler for LevelIntroScreen {
    fn on_enter(&self, flow: &mut GameFlow, collab: &mut Collaborators<'_>) {
        let level = collab.scoreboard.level + 1;
        flow.init_level(level, collab);
        collab.audio.play(SoundCue::LevelStart);
    }

    fn update(
        &self,
        flow: &mut GameFlow,
        now: Millis,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        flow.timer.expired(now).then(|| Transition::to(Screen::Gameplay))
    }

    fn draw_plan(&self, _flow: &mut GameFlow, _now: Millis, collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Starfield);
        plan.push(TextItem::centered(
            format!("LEVEL {:03}", collab.scoreboard.level),
            Vec2::new(CENTER_X, 160.0),
            2.0,
        ));
        plan.push(TextItem::centered(
            format!("WAVE {}, SECTOR {}", collab.scoreboard.wave, collab.scoreboard.sector),
            Vec2::new(CENTER_X, 240.0),
            2.0,
        ));
        plan
    }
}

pub(super) struct GameplayScreen;

impl ScreenHandler for GameplayScreen {
    fn handle_input(
        &self,
        flow: &mut GameFlow,
        snap: &InputSnapshot,
        dt_sec: f32,
        collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        if flow.arbiter.arbitrate(snap, dt_sec, collab) {
            return Some(Transition::with_grace(Screen::Options, HOLD_OPTIONS_GRACE_MS));
        }
        None
    }

    fn update(
        &self,
        _flow: &mut GameFlow,
        _now: Millis,
        collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        if collab.ship.state() == ShipState::Destroyed {
            return Some(Transition::to(Screen::GameOver));
        }
        // Field cleared of hazards and pickups: the wave is done
        if collab.hazards.count() == 0 && collab.pickups.count() == 0 {
            return Some(Transition::to(Screen::LevelIntro));
        }
        None
    }

    fn draw_plan(&self, _flow: &mut GameFlow, _now: Millis, _collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Starfield);
        plan.scoreboard_visible = true;
        plan.layers = Layers::ALL;
        plan
    }
}

pub(super) struct GameOverScreen;

impl ScreenHandler for GameOverScreen {
    fn on_enter(&self, flow: &mut GameFlow, collab: &mut Collaborators<'_>) {
        flow.game_in_progress = false;
        collab.audio.play(SoundCue::GameOver);
    }

    fn draw_plan(&self, flow: &mut GameFlow, now: Millis, collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Starfield);
        plan.scoreboard_visible = true;
        plan.push(TextItem::centered(
            "GAME OVER",
            Vec2::new(collab.scoreboard.sector_center_x(), 200.0),
            2.0,
        ));
        if BlinkStyle::TwoOfThree.visible(flow.timer.elapsed(now)) {
            plan.push(TextItem::centered("PRESS BACK", Vec2::new(CENTER_X, 420.0), 1.0));
            plan.push(TextItem::centered(
                "TO RETURN TO MAIN MENU",
                Vec2::new(CENTER_X, 450.0),
                1.0,
            ));
        }
        plan
    }
}

pub(super) struct CreditsScreen;

impl ScreenHandler for CreditsScreen {
    fn handle_input(
        &self,
        _flow: &mut GameFlow,
        snap: &InputSnapshot,
        _dt_sec: f32,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        snap.release.map(|_| Transition::to(Screen::MainMenu))
    }

    fn update(
        &self,
        flow: &mut GameFlow,
        now: Millis,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        flow.timer.expired(now).then(|| Transition::to(Screen::MainMenu))
    }

    fn draw_plan(&self, flow: &mut GameFlow, now: Millis, _collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Black);
        plan.push(TextItem::centered("UFO INVASION", Vec2::new(CENTER_X, 35.0), 1.0));
        plan.push(TextItem::centered(
            "SEND QUESTIONS OR COMMENTS",
            Vec2::new(CENTER_X, 80.0),
            1.0,
        ));
        plan.push(TextItem::centered(
            "ABOUT THE GAME TO THE ADDRESS BELOW:",
            Vec2::new(CENTER_X, 110.0),
            1.0,
        ));
        plan.push(TextItem::centered("ARCADE EDITION, 2013", Vec2::new(CENTER_X, 155.0), 1.0));
        plan.push(TextItem::centered(
            "FEEDBACK@IMPROVISOFT.COM",
            Vec2::new(CENTER_X, 185.0),
            1.0,
        ));
        if BlinkStyle::OneOfTwo.visible(flow.timer.elapsed(now)) {
            plan.push(TextItem::centered(
                "TAP SCREEN TO CONTINUE",
                Vec2::new(CENTER_X, 450.0),
                1.0,
            ));
        }
        plan
    }
}

pub(super) struct HelpScreen;

impl ScreenHandler for HelpScreen {
    fn on_enter(&self, _flow: &mut GameFlow, collab: &mut Collaborators<'_>) {
        collab.pickups.reset();
        for (i, kind) in PickupKind::ALL.into_iter().enumerate() {
            let pos = Vec2::new(
                HELP_PICKUP_X,
                HELP_PICKUP_FIRST_Y + HELP_PICKUP_SPACING * i as f32,
            );
            collab.pickups.spawn_sample(kind, pos);
        }
    }

    fn handle_input(
        &self,
        _flow: &mut GameFlow,
        snap: &InputSnapshot,
        _dt_sec: f32,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        snap.release.map(|_| Transition::to(Screen::MainMenu))
    }

    fn update(
        &self,
        flow: &mut GameFlow,
        now: Millis,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        flow.timer.expired(now).then(|| Transition::to(Screen::MainMenu))
    }

    fn draw_plan(&self, flow: &mut GameFlow, now: Millis, _collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Black);
        plan.layers = Layers::PICKUPS;
        plan.push(TextItem::centered("HELP", Vec2::new(CENTER_X, 40.0), 2.0));
        plan.push(TextItem::centered(draw::VERSION_LINE, Vec2::new(CENTER_X, 76.0), 1.0).dim());

        let mut y = HELP_PICKUP_FIRST_Y;
        for kind in PickupKind::ALL {
            plan.push(TextItem::new(kind.label(), Vec2::new(HELP_LABEL_X, y), 1.0));
            y += HELP_PICKUP_SPACING;
        }

        y += HELP_PICKUP_SPACING / 2.0;
        for line in [
            "TILT SCREEN OR FLICK SHIP - MOVE SHIP",
            "DRAG SHIP - MOVE AND THEN STOP SHIP",
            "TAP SCREEN - FIRE WEAPON",
            "TAP WEAPON - CHANGE WEAPON IF AVAILABLE",
            "HOLD SCOREBOARD - GO TO OPTIONS SCREEN",
        ] {
            plan.push(TextItem::centered(line, Vec2::new(CENTER_X, y), 1.0));
            y += HELP_PICKUP_SPACING;
        }

        if BlinkStyle::OneOfTwo.visible(flow.timer.elapsed(now)) {
            plan.push(TextItem::centered(
                "TAP SCREEN TO CONTINUE",
                Vec2::new(CENTER_X, 450.0),
                1.0,
            ));
        }
        plan
    }
}

pub(super) struct PauseScreen;

impl ScreenHandler for PauseScreen {
    fn handle_input(
        &self,
        flow: &mut GameFlow,
        snap: &InputSnapshot,
        _dt_sec: f32,
        _collab: &mut Collaborators<'_>,
    ) -> Option<Transition> {
        let rows = menu::pause_rows();
        if snap.live.is_some() {
            flow.hover = menu::hover_index(&rows, snap.live);
            return None;
        }
        match menu::committed(&rows, snap.release)? {
            PauseAction::Resume => Some(Transition::to(Screen::Gameplay)),
            PauseAction::MainMenu => Some(Transition::to(Screen::MainMenu)),
            PauseAction::Quit => {
                flow.exit_requested = true;
                None
            }
        }
    }

    fn draw_plan(&self, flow: &mut GameFlow, _now: Millis, _collab: &Collaborators<'_>) -> FramePlan {
        let mut plan = FramePlan::new(Background::Starfield);
        plan.push(TextItem::centered("GAME IS PAUSED", Vec2::new(CENTER_X, 45.0), 2.0));
        for (i, row) in menu::pause_rows().into_iter().enumerate() {
            let item = TextItem::centered(row.label, Vec2::new(CENTER_X, row.baseline_y), 1.5);
            plan.push(if flow.hover == Some(i) { item } else { item.dim() });
        }
        plan
    }
}

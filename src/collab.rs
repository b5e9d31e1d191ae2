//! Narrow ports to externally-owned collaborators
//!
//! The core never simulates the ship, projectiles, hazards or pickups; it
//! issues commands through these traits and reads back a handful of state
//! queries. The host wires its own implementations in through
//! [`Collaborators`] each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::Region;

/// Whether the player ship is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipState {
    Ok,
    Destroyed,
}

/// Difficulty setting, cycled from the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Next value in the Easy -> Medium -> Hard -> Easy cycle
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Which side of the screen the scoreboard panel occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplaySide {
    #[default]
    Left,
    Right,
}

impl DisplaySide {
    pub fn flipped(self) -> Self {
        match self {
            DisplaySide::Left => DisplaySide::Right,
            DisplaySide::Right => DisplaySide::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplaySide::Left => "LEFT",
            DisplaySide::Right => "RIGHT",
        }
    }
}

/// Ship weapon currently shown on the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Photon,
    Laser,
}

/// Pickup kinds, one sample of each is shown on the help screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    PhotonAmmo,
    WeaponUpgrade,
    WavePoints,
    LaserAmmo,
    ShieldCharge,
}

impl PickupKind {
    pub const ALL: [PickupKind; 5] = [
        PickupKind::PhotonAmmo,
        PickupKind::WeaponUpgrade,
        PickupKind::WavePoints,
        PickupKind::LaserAmmo,
        PickupKind::ShieldCharge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PickupKind::PhotonAmmo => "PHOTON AMMO BONUS",
            PickupKind::WeaponUpgrade => "WEAPON UPGRADE BONUS",
            PickupKind::WavePoints => "100X WAVE POINTS BONUS",
            PickupKind::LaserAmmo => "LASER AMMO BONUS",
            PickupKind::ShieldCharge => "SHIELD CHARGE BONUS",
        }
    }
}

/// One-shot sound effects the core requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    MenuTap,
    LevelStart,
    GameOver,
}

/// Commands and queries against the player ship
pub trait ShipPort {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    /// Signed horizontal speed step (negative = leftward)
    fn speed_x(&self) -> i32;
    fn state(&self) -> ShipState;
    /// Set leftward speed to `step`
    fn move_left(&mut self, step: i32);
    /// Set rightward speed to `step`
    fn move_right(&mut self, step: i32);
    fn skid(&mut self);
    fn skid_to_stop(&mut self);
    fn stop_moving(&mut self);
    fn fire_weapon(&mut self);
    fn select_next_weapon(&mut self);
    fn weapon(&self) -> Weapon;
    fn auto_select_weapon(&self) -> bool;
    fn set_auto_select_weapon(&mut self, enabled: bool);
    fn reset(&mut self);
    fn init_level(&mut self);
    fn intersects(&self, pt: Vec2) -> bool;
}

/// Minimal surface shared by all entity managers
pub trait EntityPort {
    fn reset(&mut self);
    fn count(&self) -> usize;
}

/// Hazard (enemy wave) manager
pub trait HazardPort: EntityPort {
    fn set_level(&mut self, level: u32);
    fn init_level(&mut self, level: u32);
}

/// Pickup manager; also populates the help screen's samples
pub trait PickupPort: EntityPort {
    fn spawn_sample(&mut self, kind: PickupKind, pos: Vec2);
}

/// Sound and music playback owned by the host
pub trait AudioPort {
    fn play(&mut self, cue: SoundCue);
    fn music_enabled(&self) -> bool;
    fn set_music_enabled(&mut self, enabled: bool);
    fn play_music(&mut self);
    fn stop_music(&mut self);
    fn music_playing(&self) -> bool;
}

/// Failure from a best-effort platform service
///
/// Callers log and ignore these; they never change screen state.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform service unavailable: {0}")]
    Unavailable(&'static str),
    #[error("platform service failed: {0}")]
    Failed(String),
}

/// Optional platform services reachable from menu actions
pub trait PlatformPort {
    fn open_review(&mut self) -> Result<(), PlatformError>;
    fn open_store_search(&mut self, terms: &str) -> Result<(), PlatformError>;
}

/// Score/HUD state mutated by the core, drawn by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub level: u32,
    pub wave: u32,
    pub sector: u32,
    pub difficulty: Difficulty,
    pub display_side: DisplaySide,
    pub weapon: Weapon,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            level: 0,
            wave: 1,
            sector: 1,
            difficulty: Difficulty::default(),
            display_side: DisplaySide::default(),
            weapon: Weapon::default(),
        }
    }
}

impl Scoreboard {
    /// Panel width in virtual pixels
    pub const PANEL_WIDTH: f32 = 160.0;

    /// Full-height panel strip on the configured side
    pub fn panel_rect(&self) -> Region {
        match self.display_side {
            DisplaySide::Left => Region::new(0.0, 0.0, Self::PANEL_WIDTH, SCREEN_HEIGHT),
            DisplaySide::Right => Region::new(
                SCREEN_WIDTH - Self::PANEL_WIDTH,
                0.0,
                Self::PANEL_WIDTH,
                SCREEN_HEIGHT,
            ),
        }
    }

    /// Hot zone that cycles the ship weapon when tapped
    pub fn weapon_tap_rect(&self) -> Region {
        let panel = self.panel_rect();
        Region::new(panel.x + 10.0, 330.0, Self::PANEL_WIDTH - 20.0, 50.0)
    }

    /// Hot zone that toggles auto-select-weapon when tapped
    pub fn auto_select_tap_rect(&self) -> Region {
        let panel = self.panel_rect();
        Region::new(panel.x + 10.0, 390.0, Self::PANEL_WIDTH - 20.0, 40.0)
    }

    /// x center of the play area outside the panel
    pub fn sector_center_x(&self) -> f32 {
        match self.display_side {
            DisplaySide::Left => Self::PANEL_WIDTH + (SCREEN_WIDTH - Self::PANEL_WIDTH) / 2.0,
            DisplaySide::Right => (SCREEN_WIDTH - Self::PANEL_WIDTH) / 2.0,
        }
    }
}

/// Mutable borrows of every collaborator, threaded through each frame
pub struct Collaborators<'a> {
    pub ship: &'a mut dyn ShipPort,
    pub bullets: &'a mut dyn EntityPort,
    pub hazards: &'a mut dyn HazardPort,
    pub pickups: &'a mut dyn PickupPort,
    pub scoreboard: &'a mut Scoreboard,
    pub audio: &'a mut dyn AudioPort,
    pub platform: &'a mut dyn PlatformPort,
}

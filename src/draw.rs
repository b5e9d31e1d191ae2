//! Per-frame draw plan handed back to the host
//!
//! The core owns no renderer. Each frame it describes what the current screen
//! looks like as a [`FramePlan`]: a background selector, ordered text items,
//! the optional main-menu cursor, and which host-drawn layers are visible.
//! The host walks the plan with its own sprite and text machinery.

use glam::Vec2;

use crate::consts::SCREEN_WIDTH;

/// Version line shown on the main menu and help screens
pub const VERSION_LINE: &str = "VERSION 1.1";

/// Full-screen background for the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// Title artwork behind the main menu
    Title,
    /// Scrolling starfield behind play-adjacent screens
    Starfield,
    /// Plain black for the text screens
    #[default]
    Black,
}

/// Brightness bucket for a text item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shade {
    #[default]
    Bright,
    Dim,
}

/// One line of text in the plan
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub scale: f32,
    pub shade: Shade,
    pub centered: bool,
}

impl TextItem {
    /// Left-aligned bright text
    pub fn new(text: impl Into<String>, pos: Vec2, scale: f32) -> Self {
        Self { text: text.into(), pos, scale, shade: Shade::Bright, centered: false }
    }

    /// Horizontally centered bright text
    pub fn centered(text: impl Into<String>, pos: Vec2, scale: f32) -> Self {
        Self { text: text.into(), pos, scale, shade: Shade::Bright, centered: true }
    }

    pub fn dim(mut self) -> Self {
        self.shade = Shade::Dim;
        self
    }
}

/// Host-drawn layers visible this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layers {
    pub ship: bool,
    pub bullets: bool,
    pub hazards: bool,
    pub pickups: bool,
}

impl Layers {
    pub const NONE: Layers = Layers { ship: false, bullets: false, hazards: false, pickups: false };
    /// Everything, as during gameplay
    pub const ALL: Layers = Layers { ship: true, bullets: true, hazards: true, pickups: true };
    /// Sample pickups only, as on the help screen
    pub const PICKUPS: Layers = Layers { ship: false, bullets: false, hazards: false, pickups: true };
}

/// Pulsing row cursor on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    /// Row the cursor sits beside
    pub row: usize,
    /// Animation frame, wraps at the sprite-strip length
    pub frame: u8,
}

/// Everything the host needs to render one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramePlan {
    pub background: Background,
    pub text: Vec<TextItem>,
    pub cursor: Option<MenuCursor>,
    pub scoreboard_visible: bool,
    pub layers: Layers,
}

impl FramePlan {
    pub fn new(background: Background) -> Self {
        Self { background, ..Default::default() }
    }

    pub fn push(&mut self, item: TextItem) {
        self.text.push(item);
    }
}

/// Dim version line tucked into the lower-right corner
pub fn version_corner() -> TextItem {
    TextItem::centered(VERSION_LINE, Vec2::new(SCREEN_WIDTH - 100.0, 460.0), 1.0).dim()
}

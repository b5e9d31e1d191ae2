//! Pointer, gesture and tilt normalization
//!
//! The host feeds one [`RawFrame`] per update: the current touch collection,
//! the engine-recognized gestures since the last frame, and the latest tilt
//! reading. The [`Normalizer`] turns that into at most one [`InputSnapshot`],
//! a value valid for exactly one frame.
//!
//! Two boundary rules keep input from leaking across screens: gestures
//! recognized before a screen transition are drained and never reach the new
//! screen, and a touch already in progress at the transition arms a
//! wait-for-release latch that suppresses all input until the finger lifts.

use bitflags::bitflags;
use glam::Vec2;

use crate::timer::Millis;

/// Phase of a touch sample within its contact lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Pressed,
    Moved,
    Released,
}

/// One touch point as reported by the host this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub pos: Vec2,
    pub phase: TouchPhase,
}

/// A discrete gesture recognized by the host engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap,
    /// Horizontal drag with its per-frame delta
    Drag { delta: Vec2 },
    /// Flick with its release velocity delta
    Flick { delta: Vec2 },
    Hold,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureSet {
        match self {
            GestureEvent::Tap => GestureSet::TAP,
            GestureEvent::Drag { .. } => GestureSet::DRAG,
            GestureEvent::Flick { .. } => GestureSet::FLICK,
            GestureEvent::Hold => GestureSet::HOLD,
        }
    }
}

bitflags! {
    /// Which gesture kinds a screen wants recognized
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GestureSet: u8 {
        const TAP = 1 << 0;
        const DRAG = 1 << 1;
        const FLICK = 1 << 2;
        const HOLD = 1 << 3;
    }
}

/// Raw per-frame input collected by the host loop
#[derive(Debug, Clone, Default)]
pub struct RawFrame {
    /// Monotonic time of this frame (ms)
    pub now: Millis,
    /// Seconds since the previous frame
    pub dt_sec: f32,
    /// Active touches; only the first is considered
    pub touches: Vec<TouchSample>,
    /// Gestures recognized since the last frame, in recognition order
    pub gestures: Vec<GestureEvent>,
    /// Latest tilt-sensor vector
    pub tilt: Vec2,
    /// Back-button edge this frame
    pub back_pressed: bool,
}

/// Screen-independent input for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    /// Primary pointer position while pressed or moving
    pub live: Option<Vec2>,
    /// Primary pointer position on the frame it released
    pub release: Option<Vec2>,
    /// Discrete gestures, filtered to the screen's enabled set
    pub gestures: Vec<GestureEvent>,
    /// Latest tilt reading
    pub tilt: Vec2,
}

/// Converts raw frames into snapshots, holding the cross-screen latches
#[derive(Debug)]
pub struct Normalizer {
    wait_for_release: bool,
    enabled: GestureSet,
}

impl Normalizer {
    pub fn new(enabled: GestureSet) -> Self {
        Self { wait_for_release: false, enabled }
    }

    /// Reconfigure at a screen boundary
    ///
    /// Arms the wait-for-release latch when a touch is already down, so a tap
    /// meant for the old screen cannot act on the new one.
    pub fn rearm(&mut self, enabled: GestureSet, touch_in_progress: bool) {
        self.enabled = enabled;
        if touch_in_progress {
            self.wait_for_release = true;
        }
    }

    pub fn enabled(&self) -> GestureSet {
        self.enabled
    }

    /// Build this frame's snapshot, or None while input is suppressed
    ///
    /// `drain_gestures` is set on screen-boundary frames: the pending gesture
    /// queue is discarded before any consumer sees it.
    pub fn snapshot(&mut self, raw: &RawFrame, drain_gestures: bool) -> Option<InputSnapshot> {
        if self.wait_for_release {
            if raw.touches.is_empty() {
                self.wait_for_release = false;
            } else {
                return None;
            }
        }

        let mut live = None;
        let mut release = None;

        // Multi-touch beyond the primary point is ignored
        if let Some(primary) = raw.touches.first() {
            match primary.phase {
                TouchPhase::Pressed | TouchPhase::Moved => live = Some(primary.pos),
                TouchPhase::Released => release = Some(primary.pos),
            }
        }

        let gestures = if drain_gestures {
            Vec::new()
        } else {
            raw.gestures
                .iter()
                .filter(|g| self.enabled.contains(g.kind()))
                .copied()
                .collect()
        };

        Some(InputSnapshot { live, release, gestures, tilt: raw.tilt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(touches: Vec<TouchSample>, gestures: Vec<GestureEvent>) -> RawFrame {
        RawFrame { touches, gestures, ..Default::default() }
    }

    fn touch(x: f32, y: f32, phase: TouchPhase) -> TouchSample {
        TouchSample { pos: Vec2::new(x, y), phase }
    }

    #[test]
    fn test_touch_phases_populate_live_or_release() {
        let mut n = Normalizer::new(GestureSet::TAP);

        let snap = n.snapshot(&raw(vec![touch(10.0, 20.0, TouchPhase::Pressed)], vec![]), false);
        let snap = snap.unwrap();
        assert_eq!(snap.live, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(snap.release, None);

        let snap = n
            .snapshot(&raw(vec![touch(10.0, 25.0, TouchPhase::Released)], vec![]), false)
            .unwrap();
        assert_eq!(snap.live, None);
        assert_eq!(snap.release, Some(Vec2::new(10.0, 25.0)));

        let snap = n.snapshot(&raw(vec![], vec![]), false).unwrap();
        assert_eq!(snap.live, None);
        assert_eq!(snap.release, None);
    }

    #[test]
    fn test_secondary_touches_ignored() {
        let mut n = Normalizer::new(GestureSet::TAP);
        let snap = n
            .snapshot(
                &raw(
                    vec![
                        touch(1.0, 1.0, TouchPhase::Moved),
                        touch(99.0, 99.0, TouchPhase::Released),
                    ],
                    vec![],
                ),
                false,
            )
            .unwrap();
        assert_eq!(snap.live, Some(Vec2::new(1.0, 1.0)));
        assert_eq!(snap.release, None);
    }

    #[test]
    fn test_latch_suppresses_until_release() {
        let mut n = Normalizer::new(GestureSet::TAP);
        n.rearm(GestureSet::TAP, true);

        // Finger still down: everything suppressed
        assert!(
            n.snapshot(&raw(vec![touch(5.0, 5.0, TouchPhase::Moved)], vec![GestureEvent::Tap]), false)
                .is_none()
        );
        // Even the release frame itself reports touches, still suppressed
        assert!(
            n.snapshot(&raw(vec![touch(5.0, 5.0, TouchPhase::Released)], vec![]), false)
                .is_none()
        );
        // Touch collection empty: latch clears and input flows again
        let snap = n.snapshot(&raw(vec![], vec![GestureEvent::Tap]), false).unwrap();
        assert_eq!(snap.gestures, vec![GestureEvent::Tap]);
    }

    #[test]
    fn test_boundary_frame_drains_gestures() {
        let mut n = Normalizer::new(GestureSet::TAP | GestureSet::HOLD);
        let snap = n
            .snapshot(&raw(vec![], vec![GestureEvent::Tap, GestureEvent::Hold]), true)
            .unwrap();
        assert!(snap.gestures.is_empty());
    }

    #[test]
    fn test_disabled_gestures_filtered() {
        let mut n = Normalizer::new(GestureSet::TAP);
        let drag = GestureEvent::Drag { delta: Vec2::new(30.0, 0.0) };
        let snap = n.snapshot(&raw(vec![], vec![drag, GestureEvent::Tap]), false).unwrap();
        assert_eq!(snap.gestures, vec![GestureEvent::Tap]);

        n.rearm(GestureSet::TAP | GestureSet::DRAG, false);
        let snap = n.snapshot(&raw(vec![], vec![drag, GestureEvent::Tap]), false).unwrap();
        assert_eq!(snap.gestures, vec![drag, GestureEvent::Tap]);
    }
}

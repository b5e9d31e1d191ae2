//! Gameplay input arbitration
//!
//! During gameplay three input sources compete for the ship: hot-zone taps on
//! the score panel, discrete gestures, and the tilt sensor. The [`Arbiter`]
//! resolves one frame's [`InputSnapshot`] into ship commands with a fixed
//! priority: hot zones consume the frame outright, gestures outrank tilt, and
//! tilt only steers while no gesture produced a step or stop.
//!
//! Skid rules make direction changes feel mechanical rather than instant: a
//! reversal at speed brakes (skid) before the new velocity takes hold, and a
//! tap on a fast-moving ship skids it to a stop instead of freezing it.

use log::debug;

use crate::collab::{Collaborators, ShipState};
use crate::consts::{
    SETTLE_INTERVAL_SEC, SKID_SPEED, STEP_FAST, STEP_SLOW, TILT_DEADZONE, TILT_STRONG,
};
use crate::input::{GestureEvent, InputSnapshot};

/// Per-run arbitration state, reset when gameplay starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arbiter {
    /// Latched while a touch has landed on the ship; gestures that steer the
    /// ship only apply while set
    ship_selected: bool,
    /// Horizontal direction of the previous drag, for reversal detection
    last_drag_dx: f32,
    /// Seconds since the last tilt-neutral damping step, starts saturated
    settle_clock_sec: f32,
}

impl Default for Arbiter {
    fn default() -> Self {
        Self { ship_selected: false, last_drag_dx: 0.0, settle_clock_sec: 60.0 }
    }
}

impl Arbiter {
    pub fn ship_selected(&self) -> bool {
        self.ship_selected
    }

    /// Arbitrate one frame of gameplay input into ship commands
    ///
    /// Returns true when a hold gesture landed on the score panel, which asks
    /// the caller to open the options screen.
    pub fn arbitrate(
        &mut self,
        snap: &InputSnapshot,
        dt_sec: f32,
        collab: &mut Collaborators<'_>,
    ) -> bool {
        self.settle_clock_sec += dt_sec;

        // Hot-zone taps consume the whole frame, remaining gestures included
        if let Some(release) = snap.release {
            if collab.scoreboard.weapon_tap_rect().contains(release) {
                collab.ship.select_next_weapon();
                collab.scoreboard.weapon = collab.ship.weapon();
                debug!("weapon hot-zone tap, now {:?}", collab.scoreboard.weapon);
                return false;
            }
            if collab.scoreboard.auto_select_tap_rect().contains(release) {
                let enabled = !collab.ship.auto_select_weapon();
                collab.ship.set_auto_select_weapon(enabled);
                return false;
            }
        }

        if let Some(live) = snap.live {
            if collab.ship.intersects(live) {
                self.ship_selected = true;
            }
        }

        let mut options_requested = false;
        let mut fire = false;
        let mut left = 0;
        let mut right = 0;
        let mut skid_to_stop = false;
        let mut skid = false;
        let mut stop = false;

        for gesture in &snap.gestures {
            match *gesture {
                GestureEvent::Tap => {
                    if self.ship_selected {
                        if collab.ship.speed_x().abs() > SKID_SPEED {
                            skid_to_stop = true;
                        } else {
                            stop = true;
                        }
                    }
                    fire = true;
                }
                GestureEvent::Drag { delta } => {
                    if self.ship_selected {
                        stop = true;
                        let pos = collab.ship.position();
                        collab.ship.set_position(pos + delta);

                        // Reversal against the ship's velocity or the previous drag
                        if delta.x > 0.0 {
                            if collab.ship.speed_x() < 0 || self.last_drag_dx < 0.0 {
                                skid = true;
                            }
                        } else if delta.x < 0.0
                            && (collab.ship.speed_x() > 0 || self.last_drag_dx > 0.0)
                        {
                            skid = true;
                        }
                        self.last_drag_dx = delta.x;
                    }
                }
                GestureEvent::Hold => {
                    if let Some(live) = snap.live {
                        if collab.scoreboard.panel_rect().contains(live) {
                            options_requested = true;
                        }
                    }
                }
                GestureEvent::Flick { delta } => {
                    if self.ship_selected {
                        if delta.x > 0.0 {
                            if collab.ship.speed_x() < 0 {
                                skid = true;
                            }
                            right = STEP_FAST;
                        } else if delta.x < 0.0 {
                            if collab.ship.speed_x() > 0 {
                                skid = true;
                            }
                            left = STEP_FAST;
                        }
                    }
                }
            }
        }

        // Gestures outrank tilt: any step or stop mutes the sensor this frame
        if left == 0 && right == 0 && !stop && !skid_to_stop {
            let lateral = -snap.tilt.y;

            if lateral > TILT_DEADZONE {
                right = if lateral > TILT_STRONG { STEP_FAST } else { STEP_SLOW };
                if collab.ship.speed_x() < -SKID_SPEED {
                    skid = true;
                }
            }
            if lateral < -TILT_DEADZONE {
                left = if lateral < -TILT_STRONG { STEP_FAST } else { STEP_SLOW };
                if collab.ship.speed_x() > SKID_SPEED {
                    skid = true;
                }
            }

            // Neutral tilt bleeds residual speed off, one unit per interval
            if lateral.abs() <= TILT_DEADZONE && self.settle_clock_sec > SETTLE_INTERVAL_SEC {
                self.settle_clock_sec = 0.0;
                let speed = collab.ship.speed_x();
                if speed < 0 {
                    collab.ship.move_left(speed.abs() - 1);
                } else if speed > 0 {
                    collab.ship.move_right(speed - 1);
                }
            }
        }

        if fire && collab.ship.state() == ShipState::Ok {
            collab.ship.fire_weapon();
        }

        if skid_to_stop {
            collab.ship.skid_to_stop();
        } else {
            if skid {
                collab.ship.skid();
            }
            if stop {
                collab.ship.stop_moving();
            }
        }

        // Skid/stop first so a reversal brakes before the new speed lands
        if left != 0 {
            collab.ship.move_left(left);
        } else if right != 0 {
            collab.ship.move_right(right);
        }

        if snap.live.is_none() {
            self.ship_selected = false;
            self.last_drag_dx = 0.0;
        }

        options_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::mock::Harness;
    use crate::collab::Weapon;
    use glam::Vec2;

    fn snap(
        live: Option<Vec2>,
        release: Option<Vec2>,
        gestures: Vec<GestureEvent>,
        tilt: Vec2,
    ) -> InputSnapshot {
        InputSnapshot { live, release, gestures, tilt }
    }

    fn on_ship() -> Vec2 {
        Vec2::new(400.0, 430.0)
    }

    #[test]
    fn test_tap_fires_without_selection() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        a.arbitrate(
            &snap(None, None, vec![GestureEvent::Tap], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert_eq!(h.ship.fires, 1);
        assert_eq!(h.ship.stops, 0);
        assert_eq!(h.ship.skid_to_stops, 0);
    }

    #[test]
    fn test_tap_on_selected_fast_ship_skids_to_stop() {
        let mut h = Harness::default();
        h.ship.speed_x = 3;
        let mut a = Arbiter::default();
        // The touch latches selection before its tap is processed
        a.arbitrate(
            &snap(Some(on_ship()), None, vec![GestureEvent::Tap], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert!(a.ship_selected());
        assert_eq!(h.ship.fires, 1);
        assert_eq!(h.ship.skid_to_stops, 1);
        assert_eq!(h.ship.stops, 0);
        assert_eq!(h.ship.speed_x, 0);
    }

    #[test]
    fn test_tap_on_selected_slow_ship_stops() {
        let mut h = Harness::default();
        h.ship.speed_x = 2;
        let mut a = Arbiter::default();
        a.arbitrate(
            &snap(Some(on_ship()), None, vec![GestureEvent::Tap], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert_eq!(h.ship.stops, 1);
        assert_eq!(h.ship.skid_to_stops, 0);
    }

    #[test]
    fn test_weapon_hot_zone_consumes_frame() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        let release = Vec2::new(80.0, 350.0);
        a.arbitrate(
            &snap(None, Some(release), vec![GestureEvent::Tap], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert_eq!(h.ship.weapon_cycles, 1);
        assert_eq!(h.scoreboard.weapon, Weapon::Laser);
        // The queued tap never fires
        assert_eq!(h.ship.fires, 0);
    }

    #[test]
    fn test_auto_select_hot_zone_toggles() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        let release = Vec2::new(80.0, 400.0);
        a.arbitrate(
            &snap(None, Some(release), vec![GestureEvent::Tap], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert!(h.ship.auto_select);
        assert_eq!(h.ship.fires, 0);
    }

    #[test]
    fn test_drag_reversal_skids_and_moves() {
        let mut h = Harness::default();
        h.ship.speed_x = -3;
        let mut a = Arbiter::default();
        let drag = GestureEvent::Drag { delta: Vec2::new(30.0, 0.0) };
        a.arbitrate(&snap(Some(on_ship()), None, vec![drag], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.position.x, 430.0);
        assert_eq!(h.ship.skids, 1);
        assert_eq!(h.ship.stops, 1);
    }

    #[test]
    fn test_drag_against_previous_drag_skids() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        let right = GestureEvent::Drag { delta: Vec2::new(10.0, 0.0) };
        let left = GestureEvent::Drag { delta: Vec2::new(-10.0, 0.0) };
        a.arbitrate(&snap(Some(on_ship()), None, vec![right], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.skids, 0);
        a.arbitrate(&snap(Some(on_ship()), None, vec![left], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.skids, 1);
    }

    #[test]
    fn test_flick_reversal_skids_before_step() {
        let mut h = Harness::default();
        h.ship.speed_x = -3;
        let mut a = Arbiter::default();
        let flick = GestureEvent::Flick { delta: Vec2::new(500.0, 0.0) };
        a.arbitrate(&snap(Some(on_ship()), None, vec![flick], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.calls, vec!["skid", "move_right"]);
        assert_eq!(h.ship.speed_x, STEP_FAST);
    }

    #[test]
    fn test_selection_clears_when_touch_lifts() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        a.arbitrate(&snap(Some(on_ship()), None, vec![], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert!(a.ship_selected());
        a.arbitrate(&snap(None, None, vec![], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert!(!a.ship_selected());

        // Flick after the lift steers nothing
        let flick = GestureEvent::Flick { delta: Vec2::new(500.0, 0.0) };
        a.arbitrate(&snap(None, None, vec![flick], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.speed_x, 0);
    }

    #[test]
    fn test_hold_on_panel_requests_options() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        let on_panel = Vec2::new(80.0, 100.0);
        let requested = a.arbitrate(
            &snap(Some(on_panel), None, vec![GestureEvent::Hold], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert!(requested);

        // Same hold off the panel does nothing
        let off_panel = Vec2::new(400.0, 100.0);
        let requested = a.arbitrate(
            &snap(Some(off_panel), None, vec![GestureEvent::Hold], Vec2::ZERO),
            0.016,
            &mut h.collaborators(),
        );
        assert!(!requested);
    }

    #[test]
    fn test_tilt_steps_by_strength() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        // Gentle rightward tilt
        a.arbitrate(&snap(None, None, vec![], Vec2::new(0.0, -0.15)), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.speed_x, STEP_SLOW);
        // Strong rightward tilt
        a.arbitrate(&snap(None, None, vec![], Vec2::new(0.0, -0.25)), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.speed_x, STEP_FAST);
        // Strong leftward tilt skids the fast rightward ship first
        a.arbitrate(&snap(None, None, vec![], Vec2::new(0.0, 0.25)), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.speed_x, -STEP_FAST);
        assert_eq!(h.ship.skids, 1);
    }

    #[test]
    fn test_gesture_step_mutes_tilt() {
        let mut h = Harness::default();
        let mut a = Arbiter::default();
        let flick = GestureEvent::Flick { delta: Vec2::new(-500.0, 0.0) };
        // Tilt says hard right, flick says left; the flick wins
        a.arbitrate(
            &snap(Some(on_ship()), None, vec![flick], Vec2::new(0.0, -0.3)),
            0.016,
            &mut h.collaborators(),
        );
        assert_eq!(h.ship.speed_x, -STEP_FAST);
    }

    #[test]
    fn test_neutral_tilt_settles_once_per_interval() {
        let mut h = Harness::default();
        h.ship.speed_x = 3;
        let mut a = Arbiter::default();

        // Clock starts saturated, so the first neutral frame damps
        a.arbitrate(&snap(None, None, vec![], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.speed_x, 2);

        // Under a second of neutral frames: no further damping
        for _ in 0..10 {
            a.arbitrate(&snap(None, None, vec![], Vec2::ZERO), 0.05, &mut h.collaborators());
        }
        assert_eq!(h.ship.speed_x, 2);

        // Past the interval it damps again
        for _ in 0..11 {
            a.arbitrate(&snap(None, None, vec![], Vec2::ZERO), 0.05, &mut h.collaborators());
        }
        assert_eq!(h.ship.speed_x, 1);
    }

    #[test]
    fn test_destroyed_ship_does_not_fire() {
        let mut h = Harness::default();
        h.ship.state = ShipState::Destroyed;
        let mut a = Arbiter::default();
        a.arbitrate(&snap(None, None, vec![GestureEvent::Tap], Vec2::ZERO), 0.016, &mut h.collaborators());
        assert_eq!(h.ship.fires, 0);
    }
}

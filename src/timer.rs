//! Wall-clock screen timers and blink cadence
//!
//! Timers are armed fresh at every screen entry and never reinterpreted.
//! They count monotonic milliseconds supplied by the host, so behavior is
//! independent of frame rate.

use crate::consts::BLINK_PERIOD_MS;

/// Monotonic milliseconds since an arbitrary host epoch
pub type Millis = u64;

/// A timer armed at screen entry
///
/// `start` may sit in the future when a transition seeds a grace period; all
/// elapsed-time math saturates at zero until the grace runs out, so blink
/// phase and timeout both wait it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    start: Millis,
    timeout: Option<Millis>,
}

impl ArmedTimer {
    /// Arm at `now`, expiring after `timeout` ms (None = no timeout)
    pub fn arm(now: Millis, timeout: Option<Millis>) -> Self {
        Self { start: now, timeout }
    }

    /// Arm with a grace period: elapsed time starts counting `grace` ms late
    pub fn arm_with_grace(now: Millis, timeout: Option<Millis>, grace: Millis) -> Self {
        Self { start: now + grace, timeout }
    }

    /// Milliseconds elapsed since the (grace-adjusted) start
    pub fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.start)
    }

    /// True once elapsed time reaches the timeout, and not one tick before
    pub fn expired(&self, now: Millis) -> bool {
        match self.timeout {
            Some(timeout) => self.elapsed(now) >= timeout,
            None => false,
        }
    }
}

/// Blink duty cycle for the "press back" / "tap to continue" prompts
///
/// The two patterns are distinct per screen and both are intentional:
/// game-over and options show the prompt two of every three periods, credits
/// and help one of every two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStyle {
    /// Visible when (elapsed / period) % 3 != 1
    TwoOfThree,
    /// Visible when (elapsed / period) % 2 == 1
    OneOfTwo,
}

impl BlinkStyle {
    /// Whether the prompt is visible at `elapsed` ms since screen entry
    pub fn visible(&self, elapsed: Millis) -> bool {
        let window = elapsed / BLINK_PERIOD_MS;
        match self {
            BlinkStyle::TwoOfThree => window % 3 != 1,
            BlinkStyle::OneOfTwo => window % 2 == 1,
        }
    }
}

//! Elapsed-time countdowns measured against the simulation clock.

use serde::{Deserialize, Serialize};

use crate::constants::TIMER_EPSILON;

/// A countdown that started at a given simulation time.
///
/// The timer holds no clock of its own: every query takes the current
/// `elapsed_secs` of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionTimer {
    start_secs: f64,
    duration_secs: f64,
}

impl MissionTimer {
    /// Start a timer of `duration_secs` at time `now`.
    pub fn start(now: f64, duration_secs: f64) -> Self {
        Self {
            start_secs: now,
            duration_secs: duration_secs.max(0.0),
        }
    }

    /// True once `duration_secs` have passed since start or the last reset.
    /// With `reset`, an expired timer restarts at `now`.
    pub fn check(&mut self, now: f64, reset: bool) -> bool {
        if !self.is_expired(now) {
            return false;
        }
        if reset {
            self.start_secs = now;
        }
        true
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed(now) + TIMER_EPSILON >= self.duration_secs
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_secs).max(0.0)
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.duration_secs - self.elapsed(now)).max(0.0)
    }

    pub fn duration(&self) -> f64 {
        self.duration_secs
    }
}

// Copyright 2025 the Holocard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick convergence of rendered values toward their targets.
//!
//! Raw gesture input is jittery, and release snaps the target tilt straight
//! to zero. Rendering reads a smoothed copy instead: once per rendered
//! frame the host calls `tick` with the elapsed time, and the rendered
//! value takes a first-order step toward the target, snapping once it is
//! within epsilon. `tick` reports whether another frame is needed, so hosts
//! can stop scheduling frames when the card has settled (cooperative
//! polling, no callback registration).

use crate::tilt::TiltAngles;

/// Convergence parameters shared by all animated values of a card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Time constant of the approach, in seconds. Smaller is snappier.
    pub time_constant: f64,
    /// Distance below which the value snaps to its target.
    pub epsilon: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_constant: 0.12,
            epsilon: 1e-3,
        }
    }
}

/// A scalar that converges toward a retargetable goal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnimatedValue {
    current: f64,
    target: f64,
}

impl AnimatedValue {
    /// Creates a settled value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    /// Sets a new goal without disturbing the rendered value.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    /// Returns the rendered value.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Returns the goal.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns `true` once the rendered value has reached its goal.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advances the rendered value by `dt` seconds.
    ///
    /// The step is a first-order approach: the value covers the fraction
    /// `dt / time_constant` (capped at 1) of its remaining distance, then
    /// snaps when within epsilon. Returns `true` while another frame is
    /// still needed.
    pub fn tick(&mut self, dt: f64, config: &AnimationConfig) -> bool {
        let remaining = self.target - self.current;
        if remaining == 0.0 {
            return false;
        }
        if remaining.abs() <= config.epsilon {
            self.current = self.target;
            return false;
        }

        let fraction = if config.time_constant > 0.0 {
            (dt / config.time_constant).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.current += remaining * fraction;

        if (self.target - self.current).abs() <= config.epsilon {
            self.current = self.target;
            return false;
        }
        true
    }
}

/// A [`TiltAngles`] triple that converges toward a retargetable goal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnimatedTilt {
    x: AnimatedValue,
    y: AnimatedValue,
    z: AnimatedValue,
}

impl AnimatedTilt {
    /// Creates a settled tilt at the given pose.
    #[must_use]
    pub fn new(tilt: TiltAngles) -> Self {
        Self {
            x: AnimatedValue::new(tilt.x),
            y: AnimatedValue::new(tilt.y),
            z: AnimatedValue::new(tilt.z),
        }
    }

    /// Sets a new goal pose.
    pub fn retarget(&mut self, tilt: TiltAngles) {
        self.x.retarget(tilt.x);
        self.y.retarget(tilt.y);
        self.z.retarget(tilt.z);
    }

    /// Returns the rendered pose.
    #[must_use]
    pub fn current(&self) -> TiltAngles {
        TiltAngles {
            x: self.x.current(),
            y: self.y.current(),
            z: self.z.current(),
        }
    }

    /// Returns the goal pose.
    #[must_use]
    pub fn target(&self) -> TiltAngles {
        TiltAngles {
            x: self.x.target(),
            y: self.y.target(),
            z: self.z.target(),
        }
    }

    /// Returns `true` once all three axes have reached their goals.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled() && self.z.is_settled()
    }

    /// Advances all three axes; returns `true` while any still moves.
    pub fn tick(&mut self, dt: f64, config: &AnimationConfig) -> bool {
        let x = self.x.tick(dt, config);
        let y = self.y.tick(dt, config);
        let z = self.z.tick(dt, config);
        x || y || z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn settled_value_requests_no_frames() {
        let mut value = AnimatedValue::new(2.0);
        assert!(value.is_settled());
        assert!(!value.tick(FRAME, &AnimationConfig::default()));
        assert_eq!(value.current(), 2.0);
    }

    #[test]
    fn value_moves_toward_target_monotonically() {
        let config = AnimationConfig::default();
        let mut value = AnimatedValue::new(0.0);
        value.retarget(10.0);

        let mut previous = value.current();
        for _ in 0..10 {
            value.tick(FRAME, &config);
            assert!(value.current() > previous, "approach must be monotonic");
            assert!(value.current() <= 10.0, "approach must not overshoot");
            previous = value.current();
        }
    }

    #[test]
    fn value_converges_and_snaps() {
        let config = AnimationConfig::default();
        let mut value = AnimatedValue::new(0.0);
        value.retarget(10.0);

        let mut ticks = 0;
        while value.tick(FRAME, &config) {
            ticks += 1;
            assert!(ticks < 1_000, "convergence must terminate");
        }
        // The snap makes convergence exact, not merely close.
        assert_eq!(value.current(), 10.0);
        assert!(value.is_settled());
    }

    #[test]
    fn large_dt_reaches_the_target_in_one_tick() {
        let config = AnimationConfig::default();
        let mut value = AnimatedValue::new(0.0);
        value.retarget(5.0);

        // dt >= time constant covers the whole remaining distance.
        assert!(!value.tick(1.0, &config));
        assert_eq!(value.current(), 5.0);
    }

    #[test]
    fn retarget_mid_flight_redirects_the_approach() {
        let config = AnimationConfig::default();
        let mut value = AnimatedValue::new(0.0);
        value.retarget(10.0);
        value.tick(FRAME, &config);
        let mid = value.current();

        value.retarget(-10.0);
        value.tick(FRAME, &config);
        assert!(value.current() < mid, "approach must follow the new target");
    }

    #[test]
    fn zero_time_constant_snaps_immediately() {
        let config = AnimationConfig {
            time_constant: 0.0,
            epsilon: 1e-3,
        };
        let mut value = AnimatedValue::new(0.0);
        value.retarget(3.0);

        assert!(!value.tick(FRAME, &config));
        assert_eq!(value.current(), 3.0);
    }

    #[test]
    fn tilt_axes_converge_independently() {
        let config = AnimationConfig::default();
        let mut tilt = AnimatedTilt::new(TiltAngles::ZERO);
        tilt.retarget(TiltAngles {
            x: -5.0,
            y: 10.0,
            z: 0.0,
        });

        let mut ticks = 0;
        while tilt.tick(FRAME, &config) {
            ticks += 1;
            assert!(ticks < 1_000, "convergence must terminate");
        }
        assert_eq!(
            tilt.current(),
            TiltAngles {
                x: -5.0,
                y: 10.0,
                z: 0.0
            }
        );
        assert!(tilt.is_settled());
    }

    #[test]
    fn release_converges_back_to_exactly_zero() {
        let config = AnimationConfig::default();
        let mut tilt = AnimatedTilt::new(TiltAngles {
            x: -5.0,
            y: 10.0,
            z: 2.5,
        });
        tilt.retarget(TiltAngles::ZERO);

        while tilt.tick(FRAME, &config) {}
        assert_eq!(tilt.current(), TiltAngles::ZERO);
    }
}

use serde::{Deserialize, Serialize};

use crate::{config::MotionConfig, LoopTopology};

/// Scroll position and pause flag owned by one showcase instance.
///
/// `position` always stays inside `[0, loop_width)` because every write goes
/// through [`LoopTopology::wrap`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    position: f64,
    paused: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Sets the pause flag and reports whether it changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    /// Moves the strip forward by `distance` and folds it back into the loop.
    pub fn advance(&mut self, distance: f64, topology: &LoopTopology) {
        self.position = topology.wrap(self.position + distance);
    }

    /// Accepts an absolute offset reported by the surface, e.g. after a drag.
    pub fn jump_to(&mut self, offset: f64, topology: &LoopTopology) {
        self.position = topology.wrap(offset);
    }
}

/// Timing information derived from one frame timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Milliseconds since the first observed frame.
    pub elapsed: f64,
    /// Length of this frame in reference frames, clamped to the catch-up limit.
    pub frame_scale: f64,
}

/// Tracks the loop start and previous frame so per-frame speeds stay
/// independent of the display refresh rate.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    start: Option<f64>,
    last: Option<f64>,
}

impl FrameClock {
    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn observe(&mut self, timestamp: f64, motion: &MotionConfig) -> FrameTiming {
        if !timestamp.is_finite() {
            return FrameTiming {
                elapsed: self.last.zip(self.start).map(|(l, s)| l - s).unwrap_or(0.0),
                frame_scale: 0.0,
            };
        }

        let start = *self.start.get_or_insert(timestamp);
        let frame_scale = match self.last {
            None => 1.0,
            Some(last) => ((timestamp - last) / motion.frame_ms())
                .clamp(0.0, motion.max_frame_catchup),
        };
        self.last = Some(timestamp);

        FrameTiming {
            elapsed: timestamp - start,
            frame_scale,
        }
    }
}

/// Result of a single driver tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Advanced { speed: f64, distance: f64 },
    Paused,
    /// Degenerate geometry; nothing to scroll.
    Disabled,
}

/// Advances the scroll position once per frame with a breathing speed.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    motion: MotionConfig,
    clock: FrameClock,
}

impl AnimationDriver {
    pub fn new(motion: MotionConfig) -> Self {
        Self {
            motion,
            clock: FrameClock::default(),
        }
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Speed in distance per reference frame, `elapsed_ms` after start.
    pub fn speed(&self, elapsed_ms: f64) -> f64 {
        let MotionConfig {
            base_speed,
            variance_amplitude,
            time_scale,
            ..
        } = self.motion;
        base_speed + base_speed * variance_amplitude * (elapsed_ms * time_scale).sin()
    }

    pub fn tick(
        &mut self,
        state: &mut ScrollState,
        topology: Option<&LoopTopology>,
        timestamp: f64,
    ) -> TickOutcome {
        let Some(topology) = topology else {
            return TickOutcome::Disabled;
        };

        // Keep the clock moving while paused so resuming does not catch up.
        let timing = self.clock.observe(timestamp, &self.motion);
        if state.is_paused() {
            return TickOutcome::Paused;
        }

        let speed = self.speed(timing.elapsed);
        let distance = speed * timing.frame_scale;
        state.advance(distance, topology);
        TickOutcome::Advanced { speed, distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> LoopTopology {
        LoopTopology::new(10, 192.0, 16.0).unwrap()
    }

    fn steady(speed: f64) -> MotionConfig {
        MotionConfig {
            base_speed: speed,
            variance_amplitude: 0.0,
            ..MotionConfig::default()
        }
    }

    #[test]
    fn wraps_after_crossing_the_loop_width() {
        let topology = topology();
        let mut state = ScrollState::new();
        state.jump_to(2075.0, &topology);
        let mut driver = AnimationDriver::new(steady(10.0));

        let outcome = driver.tick(&mut state, Some(&topology), 1000.0);
        assert_eq!(
            outcome,
            TickOutcome::Advanced {
                speed: 10.0,
                distance: 10.0
            }
        );
        assert_eq!(state.position(), 5.0);
    }

    #[test]
    fn position_stays_in_bounds() {
        let topology = topology();
        let mut state = ScrollState::new();
        let mut driver = AnimationDriver::new(MotionConfig {
            base_speed: 37.3,
            variance_amplitude: 0.9,
            ..MotionConfig::default()
        });

        let mut ts = 0.0;
        for _ in 0..5_000 {
            ts += 16.7;
            driver.tick(&mut state, Some(&topology), ts);
            let position = state.position();
            assert!((0.0..topology.loop_width()).contains(&position));
        }
    }

    #[test]
    fn paused_ticks_hold_position() {
        let topology = topology();
        let mut state = ScrollState::new();
        let mut driver = AnimationDriver::new(steady(3.0));
        driver.tick(&mut state, Some(&topology), 0.0);
        let held = state.position();

        assert!(state.set_paused(true));
        assert!(!state.set_paused(true));
        for frame in 1..100 {
            let outcome = driver.tick(&mut state, Some(&topology), frame as f64 * 16.0);
            assert_eq!(outcome, TickOutcome::Paused);
        }
        assert_eq!(state.position(), held);
    }

    #[test]
    fn resuming_does_not_catch_up() {
        let topology = topology();
        let mut state = ScrollState::new();
        let motion = steady(2.0);
        let frame_ms = motion.frame_ms();
        let mut driver = AnimationDriver::new(motion);

        driver.tick(&mut state, Some(&topology), 0.0);
        state.set_paused(true);
        driver.tick(&mut state, Some(&topology), 10_000.0);
        state.set_paused(false);
        let before = state.position();
        driver.tick(&mut state, Some(&topology), 10_000.0 + frame_ms);

        assert!((state.position() - before - 2.0).abs() < 1e-9);
    }

    #[test]
    fn speed_breathes_around_the_base() {
        let driver = AnimationDriver::new(MotionConfig {
            base_speed: 1.0,
            variance_amplitude: 0.5,
            time_scale: 0.001,
            ..MotionConfig::default()
        });
        let quarter = std::f64::consts::FRAC_PI_2 / 0.001;

        assert!((driver.speed(0.0) - 1.0).abs() < 1e-12);
        assert!((driver.speed(quarter) - 1.5).abs() < 1e-9);
        assert!((driver.speed(3.0 * quarter) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn slow_frames_are_scaled_and_clamped() {
        let motion = steady(1.0);
        let frame_ms = motion.frame_ms();
        let mut clock = FrameClock::default();

        assert_eq!(clock.observe(100.0, &motion).frame_scale, 1.0);
        let double = clock.observe(100.0 + 2.0 * frame_ms, &motion);
        assert!((double.frame_scale - 2.0).abs() < 1e-9);
        let stalled = clock.observe(60_000.0, &motion);
        assert_eq!(stalled.frame_scale, motion.max_frame_catchup);
        let backwards = clock.observe(10.0, &motion);
        assert_eq!(backwards.frame_scale, 0.0);
    }

    #[test]
    fn non_finite_timestamps_do_not_move_the_strip() {
        let topology = topology();
        let mut state = ScrollState::new();
        let mut driver = AnimationDriver::new(steady(4.0));
        driver.tick(&mut state, Some(&topology), 0.0);
        let held = state.position();

        driver.tick(&mut state, Some(&topology), f64::NAN);
        assert_eq!(state.position(), held);
    }

    #[test]
    fn missing_topology_disables_the_driver() {
        let mut state = ScrollState::new();
        let mut driver = AnimationDriver::new(MotionConfig::default());
        assert_eq!(driver.tick(&mut state, None, 0.0), TickOutcome::Disabled);
        assert_eq!(state.position(), 0.0);
        assert!(driver.clock().start().is_none());
    }
}

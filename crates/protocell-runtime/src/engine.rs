//! Simulation: the frame driver the presentation layer talks to.
//!
//! Each frame runs the continuous pass, then every day tick the clock says
//! is due, then republishes the snapshot. Nothing is published mid-pass,
//! so the snapshot a renderer holds is always consistent.
//!
//! ```rust
//! use protocell_runtime::engine::Simulation;
//! use protocell_core::prelude::*;
//! use std::time::Duration;
//!
//! let mut config = SimConfig::default();
//! config.world.day_length_secs = 1.0;
//! let mut sim = Simulation::new(config).unwrap();
//!
//! let report = sim.frame(Duration::from_millis(2500));
//! assert_eq!(report.days_run, 2);
//! assert_eq!(sim.snapshot().day, 2);
//! ```

use crate::builder::WorldBuilder;
use crate::clock::SimClock;
use crate::events::DayEvent;
use crate::snapshot::WorldSnapshot;
use crate::world::World;
use protocell_core::config::SimConfig;
use protocell_core::error::Result;
use protocell_core::types::{OrganismId, Vec3};
use std::time::Duration;
use tracing::{debug, info};

/// What one frame did.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub days_run: u64,
    /// Events recorded during the frame, oldest first.
    pub events: Vec<DayEvent>,
}

pub struct Simulation {
    world: World,
    clock: SimClock,
    paused: bool,
    snapshot: WorldSnapshot,
}

impl Simulation {
    /// Build a populated world from `config`.
    pub fn new(config: SimConfig) -> Result<Self> {
        Ok(Self::from_world(WorldBuilder::new().with_config(config).build()?))
    }

    pub fn from_world(world: World) -> Self {
        let clock = SimClock::new(world.config().day_length());
        let snapshot = world.snapshot();
        Self {
            world,
            clock,
            paused: false,
            snapshot,
        }
    }

    /// Advance by one frame of `elapsed` real time.
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport {
        if self.paused {
            return FrameReport::default();
        }

        self.world.advance_motion(elapsed.as_secs_f64());
        let due = self.clock.advance(elapsed);
        for _ in 0..due {
            self.world.step_day();
        }
        if due > 1 {
            debug!(days = due, "caught up on slow frame");
        }

        self.publish();
        FrameReport {
            days_run: due,
            events: self.world.drain_events(),
        }
    }

    /// Run `days` day ticks back to back, skipping real time. Motion
    /// advances one day length per tick.
    pub fn run_days(&mut self, days: u64) -> Vec<DayEvent> {
        let seconds = self.clock.day_length().as_secs_f64();
        for _ in 0..days {
            self.world.advance_motion(seconds);
            self.world.step_day();
        }
        self.publish();
        self.world.drain_events()
    }

    // ---- Commands ------------------------------------------------------

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.snapshot.paused = true;
            info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.snapshot.paused = false;
            info!("resumed");
        }
    }

    /// Flip the pause state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn spawn_organism_at(&mut self, center: Vec3, count: usize) -> Option<OrganismId> {
        let spawned = self.world.spawn_organism_at(center, count);
        self.publish();
        spawned
    }

    pub fn spawn_random_organism(&mut self) -> Option<OrganismId> {
        let spawned = self.world.spawn_random_organism();
        self.publish();
        spawned
    }

    /// Tear down and reseed the world and restart the clock. The pause
    /// state is kept.
    pub fn reset(&mut self) {
        self.world.reset();
        self.clock.reset();
        self.publish();
    }

    // ---- Read access -----------------------------------------------------

    /// The snapshot published after the last completed pass or command.
    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// Events recorded by commands since the last frame.
    pub fn drain_events(&mut self) -> Vec<DayEvent> {
        self.world.drain_events()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access. Call [`Simulation::refresh`] afterwards to
    /// republish the snapshot.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn refresh(&mut self) {
        self.publish();
    }

    fn publish(&mut self) {
        let mut snapshot = self.world.snapshot();
        snapshot.paused = self.paused;
        self.snapshot = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.seed = Some(3);
        config.world.day_length_secs = 1.0;
        config
    }

    #[test]
    fn paused_frames_do_not_accumulate() {
        let mut sim = Simulation::new(fast_config()).unwrap();
        sim.frame(Duration::from_millis(600));
        sim.pause();
        let report = sim.frame(Duration::from_secs(10));
        assert_eq!(report.days_run, 0);
        assert!(report.events.is_empty());
        assert!(sim.snapshot().paused);

        sim.resume();
        assert_eq!(sim.frame(Duration::from_millis(500)).days_run, 1);
        assert_eq!(sim.world().day(), 1);
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut sim = Simulation::new(fast_config()).unwrap();
        assert!(sim.toggle_pause());
        assert!(!sim.toggle_pause());
        assert!(!sim.is_paused());
    }

    #[test]
    fn spawn_command_is_visible_immediately() {
        let mut sim = Simulation::new(fast_config()).unwrap();
        let before = sim.snapshot().organisms.len();
        let id = sim.spawn_organism_at(Vec3::new(100.0, 0.0, 100.0), 5).unwrap();
        assert_eq!(sim.snapshot().organisms.len(), before + 1);
        assert_eq!(sim.snapshot().organism(id).unwrap().member_count, 5);
        assert_eq!(sim.spawn_organism_at(Vec3::ZERO, 0), None);
    }

    #[test]
    fn reset_restarts_day_and_clock() {
        let mut sim = Simulation::new(fast_config()).unwrap();
        sim.frame(Duration::from_millis(3500));
        sim.reset();
        assert_eq!(sim.snapshot().day, 0);
        assert_eq!(sim.clock().days_fired(), 0);
        assert_eq!(sim.frame(Duration::from_millis(600)).days_run, 0);
    }

    #[test]
    fn overlong_day_fails_to_build() {
        let mut config = fast_config();
        config.world.day_length_secs = 1e20;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn run_days_skips_real_time() {
        let mut sim = Simulation::new(fast_config()).unwrap();
        sim.run_days(12);
        assert_eq!(sim.snapshot().day, 12);
        assert_eq!(sim.clock().days_fired(), 0);
    }
}

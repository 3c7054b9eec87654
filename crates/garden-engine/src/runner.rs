//! Headless run loop.
//!
//! Feeds a [`Script`] into a [`Simulation`] through the fixed-timestep driver,
//! logs every garden event and tallies a [`RunSummary`].

use garden_gameplay::{GardenEvent, GardenSnapshot, Intents, RandomSource, Simulation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::script::{Script, ScriptStep};

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Final score
    pub score: u64,
    /// Seeds sown
    pub planted: u32,
    /// Plants harvested
    pub harvested: u32,
    /// Weeds pulled by the gardener
    pub weeds_removed: u32,
    /// Weeds that sprouted
    pub weeds_sprouted: u32,
    /// Plants that withered
    pub withered: u32,
    /// Time-ability uses
    pub time_shifts: u32,
    /// Pests spawned
    pub pests_spawned: u32,
    /// Plants eaten by pests
    pub plants_eaten: u32,
    /// Pests that died
    pub pests_expired: u32,
    /// Events lost to a full bus, so the counters above may be short
    pub events_dropped: u64,
}

impl RunSummary {
    fn record(&mut self, event: &GardenEvent) {
        match event {
            GardenEvent::Planted { .. } => self.planted += 1,
            GardenEvent::Harvested { .. } => self.harvested += 1,
            GardenEvent::WeedRemoved { .. } => self.weeds_removed += 1,
            GardenEvent::WeedSprouted { .. } => self.weeds_sprouted += 1,
            GardenEvent::PlantMatured { .. } => {},
            GardenEvent::PlantWithered { .. } => self.withered += 1,
            GardenEvent::TimeShifted { .. } => self.time_shifts += 1,
            GardenEvent::PestSpawned { .. } => self.pests_spawned += 1,
            GardenEvent::PestAtePlant { .. } => self.plants_eaten += 1,
            GardenEvent::PestExpired { .. } => self.pests_expired += 1,
        }
    }
}

/// Drives a simulation from scripted input until the tick budget runs out.
#[derive(Debug)]
pub struct Runner<R: RandomSource> {
    sim: Simulation<R>,
    frame_dt: f32,
    max_ticks: u64,
    summary: RunSummary,
}

impl<R: RandomSource> Runner<R> {
    /// Create a runner.
    ///
    /// `frame_dt` must cover at least one fixed tick, or scripted waits never finish.
    pub fn new(sim: Simulation<R>, frame_dt: f32, max_ticks: u64) -> Self {
        Self {
            sim,
            frame_dt,
            max_ticks,
            summary: RunSummary::default(),
        }
    }

    /// The simulation being driven.
    #[must_use]
    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    /// Whether the tick budget is used up.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.sim.tick_count() >= self.max_ticks
    }

    /// Play a script, stopping early if the budget runs out.
    pub fn run_script(&mut self, script: &Script) {
        info!("Running script '{}'", script.name);
        self.run_steps(&script.steps);
    }

    /// Stand still until the budget is used up.
    pub fn run_idle(&mut self) {
        while !self.is_exhausted() {
            self.frame(&Intents::idle());
        }
    }

    /// Stop and hand back the final state.
    pub fn finish(mut self) -> (GardenSnapshot, RunSummary) {
        self.summary.ticks = self.sim.tick_count();
        self.summary.score = self.sim.score();
        self.summary.events_dropped = self.sim.dropped_events();
        if self.summary.events_dropped > 0 {
            warn!(
                "{} events were dropped, summary counts are incomplete",
                self.summary.events_dropped
            );
        }
        let snapshot = self.sim.snapshot();
        info!(
            "Run finished after {} ticks: score {}, beauty {:.2}, {} weeds, {} pests alive",
            self.summary.ticks,
            self.summary.score,
            snapshot.beauty,
            snapshot.count_weeds(),
            snapshot.pests.len()
        );
        (snapshot, self.summary)
    }

    fn run_steps(&mut self, steps: &[ScriptStep]) {
        for step in steps {
            if self.is_exhausted() {
                debug!("Tick budget exhausted, skipping remaining steps");
                return;
            }
            self.execute(step);
        }
    }

    fn execute(&mut self, step: &ScriptStep) {
        match step {
            ScriptStep::Wait { ticks } => self.hold(&Intents::idle(), *ticks),
            ScriptStep::Move { dx, dy, ticks } => self.hold(&Intents::moving(*dx, *dy), *ticks),
            ScriptStep::SetPosition { x, y } => {
                self.sim
                    .gardener_mut()
                    .set_position(garden_gameplay::Vec2::new(*x, *y));
            },
            ScriptStep::Interact => self.frame(&Intents::interact()),
            ScriptStep::Accelerate => self.frame(&Intents::accelerate()),
            ScriptStep::Reverse => self.frame(&Intents::reverse()),
            ScriptStep::Log { message } => info!("[script] {message}"),
            ScriptStep::Repeat { count, steps } => {
                for _ in 0..*count {
                    if self.is_exhausted() {
                        return;
                    }
                    self.run_steps(steps);
                }
            },
        }
    }

    /// Keep the same held input for a number of ticks.
    fn hold(&mut self, intents: &Intents, ticks: u64) {
        let target = self.sim.tick_count().saturating_add(ticks);
        while self.sim.tick_count() < target && !self.is_exhausted() {
            self.frame(intents);
        }
    }

    /// Run one host frame and log what happened.
    fn frame(&mut self, intents: &Intents) {
        if self.is_exhausted() {
            return;
        }
        self.sim.update(self.frame_dt, intents);
        for event in self.sim.drain_events() {
            log_event(&event);
            self.summary.record(&event);
        }
    }
}

fn log_event(event: &GardenEvent) {
    match event {
        GardenEvent::PestSpawned { pest, coord } => info!("{pest} appeared at {coord}"),
        GardenEvent::Harvested { coord, score } => info!("Harvested {coord}, score {score}"),
        other => debug!("{other:?}"),
    }
}

//! Garden session orchestration.
//!
//! [`Simulation`] owns every entity of one session and is the single source of
//! truth for the garden. Each fixed tick runs the same five phases:
//!
//! 1. At most one interaction and at most one time-ability use from the intents
//! 2. Gardener movement and energy
//! 3. Every live pest (aging, beauty drain, movement, feeding)
//! 4. Every cell, followed by the per-cell beauty assessment
//! 5. Pest spawning

use garden_common::{GardenResult, GridCoord, PestId, PestIdAllocator};
use tracing::{debug, info};

use crate::beauty::{BeautyMeter, BeautyRules};
use crate::config::GardenConfig;
use crate::events::{EventBus, GardenEvent};
use crate::gardener::{Gardener, TimeDirection};
use crate::grid::Grid;
use crate::input::Intents;
use crate::interaction::{interact, Interaction};
use crate::pest::{Pest, PestActivity, PestContext, PestRules};
use crate::rng::RandomSource;
use crate::snapshot::GardenSnapshot;
use crate::temporal::{Tick, TimeAffected};

/// Fixed timestep for simulation ticks (60 ticks per second).
pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Most ticks a single [`Simulation::update`] call may run before dropping the backlog.
pub const MAX_STEPS_PER_UPDATE: u32 = 10;

/// One garden session.
#[derive(Debug)]
pub struct Simulation<R: RandomSource = fastrand::Rng> {
    config: GardenConfig,
    beauty_rules: BeautyRules,
    pest_rules: PestRules,
    grid: Grid,
    gardener: Gardener,
    pests: Vec<Pest>,
    pest_ids: PestIdAllocator,
    beauty: BeautyMeter,
    score: u64,
    /// Ticks completed so far
    tick: u64,
    /// Ticks since the last spawn
    spawn_counter: u32,
    rng: R,
    events: EventBus,
    /// Accumulated real time for fixed timestep updates
    accumulator: f64,
    /// Intents collected by `update` but not yet consumed by a tick
    pending: Intents,
}

impl Simulation<fastrand::Rng> {
    /// Create a session with a seeded `fastrand` generator.
    pub fn with_seed(config: GardenConfig, seed: u64) -> GardenResult<Self> {
        Self::new(config, fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a session from a configuration and a random source.
    ///
    /// # Errors
    ///
    /// Returns [`garden_common::GardenError::Config`] if the configuration is invalid.
    pub fn new(config: GardenConfig, rng: R) -> GardenResult<Self> {
        config.validate()?;

        let grid = Grid::new(
            config.grid_width,
            config.grid_height,
            config.growth_thresholds(),
        );
        let gardener = Gardener::new(&config);
        let beauty = BeautyMeter::new(config.initial_beauty, config.max_beauty);

        info!(
            "Garden created: {}x{} cells, gardener at {}",
            config.grid_width,
            config.grid_height,
            gardener.grid_coord()
        );
        let events = EventBus::for_grid(config.grid_width, config.grid_height);
        debug!("Event bus holds {} events", events.capacity());

        Ok(Self {
            beauty_rules: config.beauty_rules(),
            pest_rules: config.pest_rules(),
            grid,
            gardener,
            pests: Vec::new(),
            pest_ids: PestIdAllocator::new(),
            beauty,
            score: 0,
            tick: 0,
            spawn_counter: 0,
            rng,
            events,
            accumulator: 0.0,
            pending: Intents::default(),
            config,
        })
    }

    /// Advance exactly one tick.
    pub fn step(&mut self, intents: &Intents) {
        // 1. Interaction and time ability on the gardener's current cell
        if intents.interact {
            self.handle_interact();
        }
        let direction = if intents.accelerate {
            Some(TimeDirection::Accelerate)
        } else if intents.reverse {
            Some(TimeDirection::Reverse)
        } else {
            None
        };
        if let Some(direction) = direction {
            self.handle_time_ability(direction);
        }

        // 2. Gardener
        self.gardener.tick(intents);

        // 3. Pests
        self.tick_pests();

        // 4. Cells and beauty
        self.tick_cells();

        // 5. Spawning
        self.spawn_counter = self.spawn_counter.saturating_add(1);
        if self.spawn_counter > self.config.pest_spawn_interval {
            self.spawn_counter = 0;
            let coord = GridCoord::new(
                self.rng.below(self.grid.width()) as i32,
                self.rng.below(self.grid.height()) as i32,
            );
            self.spawn_pest_at(coord);
        }

        self.tick += 1;
    }

    /// Run as many fixed ticks as `dt` seconds of real time cover.
    ///
    /// One-shot actions in `intents` fire on the first tick only; if no tick runs
    /// they are kept for the next call. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32, intents: &Intents) -> u32 {
        self.pending.absorb(intents);
        self.accumulator += f64::from(dt.max(0.0));

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_UPDATE {
            let current = if steps == 0 {
                self.pending
            } else {
                self.pending.held_only()
            };
            self.step(&current);
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }

        if self.accumulator >= FIXED_TIMESTEP {
            debug!(
                "Dropping {:.3}s of simulation backlog",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        if steps > 0 {
            self.pending = self.pending.held_only();
        }
        steps
    }

    /// Place a pest on a cell. Returns `None` if the cell is off the grid.
    pub fn spawn_pest_at(&mut self, coord: GridCoord) -> Option<PestId> {
        if !self.grid.contains(coord) {
            return None;
        }
        let id = self.pest_ids.allocate();
        self.pests.push(Pest::new(id, coord, &self.pest_rules));
        info!("{id} spawned at {coord}");
        self.events
            .publish(GardenEvent::PestSpawned { pest: id, coord });
        Some(id)
    }

    fn handle_interact(&mut self) {
        let coord = self.gardener.grid_coord();
        match interact(&mut self.grid, coord) {
            Ok(Interaction::Harvest) => {
                self.score = self.score.saturating_add(self.config.harvest_value);
                self.beauty.gain(self.beauty_rules.harvest_bonus);
                debug!("Harvested {coord}, score {}", self.score);
                self.events.publish(GardenEvent::Harvested {
                    coord,
                    score: self.score,
                });
            },
            Ok(Interaction::RemoveWeed) => {
                debug!("Weed removed at {coord}");
                self.events.publish(GardenEvent::WeedRemoved { coord });
            },
            Ok(Interaction::Plant) => {
                debug!("Planted at {coord}");
                self.events.publish(GardenEvent::Planted { coord });
            },
            Err(e) => debug!("Interact ignored: {e}"),
        }
    }

    fn handle_time_ability(&mut self, direction: TimeDirection) {
        let factor = direction.factor(self.config.time_factor);
        let radius = self.config.ability_radius;
        let Some(center) = self
            .gardener
            .try_apply_time_effect(&mut self.grid, factor, radius)
        else {
            return;
        };

        for pest in self
            .pests
            .iter_mut()
            .filter(|p| p.coord().is_within(center, radius))
        {
            pest.apply_time_effect(factor);
        }
        self.remove_dead_pests();

        self.events.publish(GardenEvent::TimeShifted {
            direction,
            center,
            energy: self.gardener.energy(),
        });
    }

    fn tick_pests(&mut self) {
        let tick = self.tick;
        for pest in &mut self.pests {
            let activity = pest.tick(PestContext {
                grid: &mut self.grid,
                beauty: &mut self.beauty,
                rng: &mut self.rng,
                tick,
                beauty_penalty: self.beauty_rules.pest_penalty,
                move_interval: self.pest_rules.move_interval,
            });
            if let PestActivity::Fed(coord) = activity {
                self.events.publish(GardenEvent::PestAtePlant {
                    pest: pest.id(),
                    coord,
                });
            }
        }
        self.remove_dead_pests();
    }

    fn tick_cells(&mut self) {
        for cell in self.grid.iter_mut() {
            let outcome = cell.tick(());
            if !outcome.is_quiet() {
                let coord = cell.coord();
                if outcome.matured {
                    self.events.publish(GardenEvent::PlantMatured { coord });
                }
                if outcome.withered {
                    debug!("Plant withered at {coord}");
                    self.events.publish(GardenEvent::PlantWithered { coord });
                }
                if outcome.weed_sprouted {
                    debug!("Weed sprouted at {coord}");
                    self.events.publish(GardenEvent::WeedSprouted { coord });
                }
            }
            self.beauty.assess_cell(cell, &self.beauty_rules);
        }
    }

    fn remove_dead_pests(&mut self) {
        let events = &mut self.events;
        self.pests.retain(|pest| {
            if pest.is_alive() {
                return true;
            }
            debug!("{} expired", pest.id());
            events.publish(GardenEvent::PestExpired { pest: pest.id() });
            false
        });
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// The garden grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The gardener.
    #[must_use]
    pub fn gardener(&self) -> &Gardener {
        &self.gardener
    }

    /// Mutable access to the gardener, e.g. to teleport it in tests or tools.
    pub fn gardener_mut(&mut self) -> &mut Gardener {
        &mut self.gardener
    }

    /// Live pests.
    #[must_use]
    pub fn pests(&self) -> &[Pest] {
        &self.pests
    }

    /// Beauty meter.
    #[must_use]
    pub fn beauty(&self) -> &BeautyMeter {
        &self.beauty
    }

    /// Harvest score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// In-bounds cells the time ability would affect right now.
    #[must_use]
    pub fn effect_area(&self) -> Vec<GridCoord> {
        self.grid
            .neighborhood(self.gardener.grid_coord(), self.config.ability_radius)
            .collect()
    }

    /// Take every event published since the last drain.
    pub fn drain_events(&self) -> Vec<GardenEvent> {
        self.events.drain()
    }

    /// Events lost because nobody drained the bus in time.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.events.dropped_count()
    }

    /// Serializable copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GardenSnapshot {
        GardenSnapshot::capture(
            self.tick,
            self.score,
            &self.grid,
            &self.gardener,
            &self.pests,
            &self.beauty,
        )
    }
}

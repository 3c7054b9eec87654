//! Garden configuration.
//!
//! All rule constants are fixed when a session is created. The configuration is
//! passed by value into [`crate::Simulation::new`] and never mutated afterwards.

use garden_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::beauty::BeautyRules;
use crate::cell::GrowthThresholds;
use crate::pest::PestRules;

/// Fixed constants for one garden session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    // === Grid ===
    /// Number of cell columns
    pub grid_width: u32,
    /// Number of cell rows
    pub grid_height: u32,
    /// Cell edge length in play-field units
    pub cell_size: u32,

    // === Plant growth ===
    /// Growth clock value at which a plant matures
    pub maturity_threshold: i32,
    /// Growth clock value beyond which a mature plant withers
    pub wither_threshold: i32,
    /// Weed clock value beyond which a weed appears
    pub weed_threshold: i32,

    // === Time ability ===
    /// Energy spent per ability use
    pub ability_cost: f32,
    /// Neighborhood radius around the gardener's cell
    pub ability_radius: u32,
    /// Magnitude of the factor used by accelerate (+) and reverse (-)
    pub time_factor: i32,

    // === Gardener ===
    /// Play-field width
    pub field_width: u32,
    /// Play-field height
    pub field_height: u32,
    /// Gardener sprite edge length
    pub agent_size: f32,
    /// Distance moved per tick
    pub agent_speed: f32,
    /// Energy ceiling
    pub max_energy: f32,
    /// Energy regained per idle tick
    pub energy_regen: f32,

    // === Pests ===
    /// Ticks between pest spawns
    pub pest_spawn_interval: u32,
    /// Upper bound for a pest's lifespan
    pub pest_lifespan_cap: i32,
    /// Lifespan of a freshly spawned pest
    pub pest_initial_lifespan: i32,
    /// Pests try to move on ticks that are multiples of this value
    pub pest_move_interval: u32,

    // === Score and beauty ===
    /// Points awarded per harvest
    pub harvest_value: u64,
    /// Beauty awarded per harvest
    pub harvest_beauty_bonus: f32,
    /// Beauty at session start
    pub initial_beauty: f32,
    /// Beauty ceiling
    pub max_beauty: f32,
    /// Beauty lost per tick for each withered or weedy cell
    pub decay_beauty_penalty: f32,
    /// Beauty gained per tick for each mature cell
    pub mature_beauty_gain: f32,
    /// Beauty lost per tick for each live pest
    pub pest_beauty_penalty: f32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            // Grid
            grid_width: 16,
            grid_height: 16,
            cell_size: 30,

            // Growth
            maturity_threshold: 100,
            wither_threshold: 150,
            weed_threshold: 300,

            // Ability
            ability_cost: 5.0,
            ability_radius: 1,
            time_factor: 10,

            // Gardener
            field_width: 640,
            field_height: 480,
            agent_size: 30.0,
            agent_speed: 3.0,
            max_energy: 100.0,
            energy_regen: 0.5,

            // Pests
            pest_spawn_interval: 500,
            pest_lifespan_cap: 200,
            pest_initial_lifespan: 100,
            pest_move_interval: 60,

            // Score and beauty
            harvest_value: 10,
            harvest_beauty_bonus: 5.0,
            initial_beauty: 50.0,
            max_beauty: 100.0,
            decay_beauty_penalty: 0.005,
            mature_beauty_gain: 0.001,
            pest_beauty_penalty: 0.01,
        }
    }
}

impl GardenConfig {
    /// Check every field for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        positive("cell_size", f64::from(self.cell_size))?;

        let grid_pixels_x = u64::from(self.grid_width) * u64::from(self.cell_size);
        let grid_pixels_y = u64::from(self.grid_height) * u64::from(self.cell_size);
        if grid_pixels_x > u64::from(self.field_width)
            || grid_pixels_y > u64::from(self.field_height)
        {
            return Err(ConfigError::FieldTooSmall {
                field_width: self.field_width,
                field_height: self.field_height,
                grid_pixels_x,
                grid_pixels_y,
            });
        }

        positive("maturity_threshold", f64::from(self.maturity_threshold))?;
        if self.wither_threshold <= self.maturity_threshold {
            return Err(ConfigError::ThresholdOrder {
                maturity: self.maturity_threshold,
                wither: self.wither_threshold,
            });
        }
        non_negative("weed_threshold", f64::from(self.weed_threshold))?;

        non_negative("ability_cost", f64::from(self.ability_cost))?;
        positive("time_factor", f64::from(self.time_factor))?;
        let radius_cap = self.grid_width.max(self.grid_height);
        if self.ability_radius > radius_cap {
            return Err(ConfigError::AboveCap {
                name: "ability_radius",
                value: f64::from(self.ability_radius),
                cap: f64::from(radius_cap),
            });
        }
        positive("agent_size", f64::from(self.agent_size))?;
        non_negative("agent_speed", f64::from(self.agent_speed))?;
        positive("max_energy", f64::from(self.max_energy))?;
        non_negative("energy_regen", f64::from(self.energy_regen))?;

        positive("pest_spawn_interval", f64::from(self.pest_spawn_interval))?;
        positive("pest_move_interval", f64::from(self.pest_move_interval))?;
        positive("pest_initial_lifespan", f64::from(self.pest_initial_lifespan))?;
        if self.pest_initial_lifespan > self.pest_lifespan_cap {
            return Err(ConfigError::AboveCap {
                name: "pest_initial_lifespan",
                value: f64::from(self.pest_initial_lifespan),
                cap: f64::from(self.pest_lifespan_cap),
            });
        }

        positive("max_beauty", f64::from(self.max_beauty))?;
        non_negative("initial_beauty", f64::from(self.initial_beauty))?;
        if self.initial_beauty > self.max_beauty {
            return Err(ConfigError::AboveCap {
                name: "initial_beauty",
                value: f64::from(self.initial_beauty),
                cap: f64::from(self.max_beauty),
            });
        }
        non_negative("harvest_beauty_bonus", f64::from(self.harvest_beauty_bonus))?;
        non_negative("decay_beauty_penalty", f64::from(self.decay_beauty_penalty))?;
        non_negative("mature_beauty_gain", f64::from(self.mature_beauty_gain))?;
        non_negative("pest_beauty_penalty", f64::from(self.pest_beauty_penalty))?;

        Ok(())
    }

    /// Offset of the grid's top-left corner inside the play field.
    ///
    /// The grid is centered; odd leftovers round toward the top-left.
    #[must_use]
    pub fn grid_margin(&self) -> (f32, f32) {
        let spare_x = self
            .field_width
            .saturating_sub(self.grid_width.saturating_mul(self.cell_size));
        let spare_y = self
            .field_height
            .saturating_sub(self.grid_height.saturating_mul(self.cell_size));
        ((spare_x / 2) as f32, (spare_y / 2) as f32)
    }

    /// Growth thresholds shared by every cell.
    #[must_use]
    pub fn growth_thresholds(&self) -> GrowthThresholds {
        GrowthThresholds {
            maturity: self.maturity_threshold,
            wither: self.wither_threshold,
            weed: self.weed_threshold,
        }
    }

    /// Beauty rates derived from this configuration.
    #[must_use]
    pub fn beauty_rules(&self) -> BeautyRules {
        BeautyRules {
            decay_penalty: self.decay_beauty_penalty,
            mature_gain: self.mature_beauty_gain,
            pest_penalty: self.pest_beauty_penalty,
            harvest_bonus: self.harvest_beauty_bonus,
        }
    }

    /// Pest rules derived from this configuration.
    #[must_use]
    pub fn pest_rules(&self) -> PestRules {
        PestRules {
            lifespan_cap: self.pest_lifespan_cap,
            initial_lifespan: self.pest_initial_lifespan,
            move_interval: self.pest_move_interval,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

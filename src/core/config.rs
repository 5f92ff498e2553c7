//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Time-based values are expressed
//! in simulated time units (the `delta_time` handed to each tick).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::entity::guest::TicketType;

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good emergent behavior.
/// Changing them will affect gameplay pacing and feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === NEED SYSTEM ===
    /// Hunger gained per time unit
    ///
    /// At 0.08, a guest starting at 50 crosses the high threshold (192)
    /// after roughly 1800 time units.
    pub hunger_rate: f32,

    /// Thirst gained per time unit (fastest-building need)
    pub thirst_rate: f32,

    /// Bathroom pressure gained per time unit
    pub bathroom_rate: f32,

    /// Energy lost per time unit
    pub energy_rate: f32,

    /// Nausea recovered per time unit, independent of the other needs
    pub nausea_recovery_rate: f32,

    /// Above this a need is "high" and costs happiness every tick
    pub need_high: f32,

    /// Above this a need is urgent enough to drive a decision
    pub need_medium: f32,

    /// Below this energy is "low"
    pub need_low: f32,

    /// Happiness lost per time unit while hunger is high
    pub hunger_penalty: f32,
    pub thirst_penalty: f32,
    pub bathroom_penalty: f32,
    /// Happiness lost per time unit while energy is low
    pub energy_penalty: f32,
    /// Happiness lost per time unit while nausea is above medium
    pub nausea_penalty: f32,

    // === THOUGHT SYSTEM ===
    /// Maximum thoughts kept per guest; older ones fall off the end
    pub max_thoughts: usize,

    /// An identical thought kind is not repeated inside this window
    pub thought_dedup_window: f64,

    /// Happiness above which a guest thinks "happy"
    pub happy_threshold: f32,

    // === DECISION ENGINE ===
    /// Ticks between two decisions of the same guest
    ///
    /// Guests are staggered over the period, so about 1/period of the
    /// population decides on any given tick.
    pub decision_period: u64,

    /// Guests below this happiness head for the exit
    pub exit_happiness: f32,

    /// Guests who have been in the park longer than this head for the exit
    pub max_time_in_park: f32,

    /// How many recent rides are excluded from selection
    pub recent_ride_lookback: usize,

    /// Intensity a guest accepts above its stated tolerance
    pub intensity_slack: u8,

    /// Rides at or above this intensity are never a fallback choice
    pub low_intensity_fallback: u8,

    /// Queue length cost relative to one tile of distance
    pub queue_length_weight: f32,

    /// Best-ranked rides the random pick is made from
    pub ride_shortlist: usize,

    /// Best-ranked rides tried when resolving a reachable point
    pub ride_candidates: usize,

    // === TARGET RESOLUTION ===
    /// Nearest matching shops tried before giving up
    pub shop_candidates: usize,

    /// Radius searched for a walkable tile next to a shop
    pub shop_search_radius: u32,

    /// Manhattan radius searched for a bench
    pub bench_search_radius: u32,

    /// Radius searched for a walkable tile next to a bench
    pub bench_walkable_radius: u32,

    /// Radius searched for a walkable tile around a ride entrance
    pub ride_search_radius: u32,

    /// Maximum offset of a random wander target
    pub wander_radius: i32,

    /// Radius searched for a walkable tile around a wander target
    pub wander_walkable_radius: u32,

    /// Paths longer than this are treated as unreachable
    pub max_path_length: usize,

    /// Cell size of the facility index (tiles)
    pub facility_cell_size: i32,

    // === MOVEMENT ===
    /// Distance per tick = speed * delta_time * movement_scale
    pub movement_scale: f32,

    /// A waypoint counts as reached below this distance
    pub waypoint_arrival: f32,

    // === INTERACTION ===
    /// Chebyshev distance at which a guest uses its target
    pub interaction_range: f32,

    /// Time a guest spends buying before walking on
    pub purchase_duration: f32,

    /// Energy restored the moment a guest sits down
    pub bench_energy_restore: f32,

    /// Energy regained per time unit while sitting
    pub sit_energy_rate: f32,

    /// Happiness regained per time unit while sitting
    pub sit_happiness_rate: f32,

    /// Sitting guests stand up once energy exceeds this
    pub sit_release_energy: f32,

    /// Cash handed to a guest by a cash machine
    pub cash_withdrawal: i64,

    /// Guests holding less than this look for a cash machine before riding
    pub low_cash_threshold: i64,

    // === RIDES ===
    /// Nausea added per intensity point when a ride was too intense
    pub intensity_nausea_factor: f32,
    pub too_intense_penalty: f32,
    /// Rides above this excitement are "great"
    pub excitement_threshold: u8,
    pub great_ride_bonus: f32,
    pub boring_ride_bonus: f32,

    // === SPAWNING & ECONOMY ===
    pub max_guests: usize,
    /// Admission chance per spawn call before the rating bonus
    pub base_spawn_chance: f64,
    /// Extra admission chance at a perfect (1000) park rating
    pub rating_spawn_bonus: f64,
    pub entry_fee: i64,
    /// Ticket type handed to newly admitted guests
    pub ticket_pricing: TicketType,
    pub starting_cash: i64,
    /// Length of an accounting month in time units
    pub month_length: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Needs (thirst > hunger > bathroom > energy)
            hunger_rate: 0.08,
            thirst_rate: 0.12,
            bathroom_rate: 0.06,
            energy_rate: 0.04,
            nausea_recovery_rate: 0.1,
            need_high: 192.0,
            need_medium: 128.0,
            need_low: 64.0,
            hunger_penalty: 0.05,
            thirst_penalty: 0.06,
            bathroom_penalty: 0.05,
            energy_penalty: 0.03,
            nausea_penalty: 0.04,

            // Thoughts
            max_thoughts: 10,
            thought_dedup_window: 30.0,
            happy_threshold: 200.0,

            // Decisions
            decision_period: 30,
            exit_happiness: 30.0,
            max_time_in_park: 3600.0,
            recent_ride_lookback: 5,
            intensity_slack: 2,
            low_intensity_fallback: 5,
            queue_length_weight: 0.5,
            ride_shortlist: 3,
            ride_candidates: 5,

            // Targets
            shop_candidates: 5,
            shop_search_radius: 4,
            bench_search_radius: 12,
            bench_walkable_radius: 4,
            ride_search_radius: 6,
            wander_radius: 8,
            wander_walkable_radius: 4,
            max_path_length: 200,
            facility_cell_size: 8,

            // Movement
            movement_scale: 0.02,
            waypoint_arrival: 0.1,

            // Interaction
            interaction_range: 0.8,
            purchase_duration: 5.0,
            bench_energy_restore: 40.0,
            sit_energy_rate: 0.5,
            sit_happiness_rate: 0.1,
            sit_release_energy: 220.0,
            cash_withdrawal: 50,
            low_cash_threshold: 10,

            // Rides
            intensity_nausea_factor: 8.0,
            too_intense_penalty: 15.0,
            excitement_threshold: 4,
            great_ride_bonus: 15.0,
            boring_ride_bonus: 5.0,

            // Spawning & economy
            max_guests: 500,
            base_spawn_chance: 0.02,
            rating_spawn_bonus: 0.03,
            entry_fee: 20,
            ticket_pricing: TicketType::PayPerRide,
            starting_cash: 50_000,
            month_length: 43_200.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document; missing keys keep defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.need_low < self.need_medium && self.need_medium < self.need_high) {
            return Err(ParkError::Config(format!(
                "need thresholds must be ordered low ({}) < medium ({}) < high ({})",
                self.need_low, self.need_medium, self.need_high
            )));
        }

        if self.need_high > 255.0 || self.need_low < 0.0 {
            return Err(ParkError::Config("need thresholds must lie in [0, 255]".into()));
        }

        if self.decision_period == 0 {
            return Err(ParkError::Config("decision_period must be at least 1".into()));
        }

        if self.max_thoughts == 0 {
            return Err(ParkError::Config("max_thoughts must be at least 1".into()));
        }

        if self.ride_shortlist == 0 || self.ride_candidates < self.ride_shortlist {
            return Err(ParkError::Config(format!(
                "ride_candidates ({}) must be >= ride_shortlist ({}) > 0",
                self.ride_candidates, self.ride_shortlist
            )));
        }

        if self.facility_cell_size <= 0 {
            return Err(ParkError::Config("facility_cell_size must be positive".into()));
        }

        if self.month_length <= 0.0 {
            return Err(ParkError::Config("month_length must be positive".into()));
        }

        Ok(())
    }
}

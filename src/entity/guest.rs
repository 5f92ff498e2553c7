//! Park guests

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{Direction, GuestId, Money, RideId, ShopId, Tick, TilePos, Vec2};
use crate::entity::intent::Intent;
use crate::entity::needs::{clamp_need, Needs};
use crate::entity::thoughts::{Thought, ThoughtLog};

/// Rides remembered for novelty filtering
const RIDE_HISTORY_LEN: usize = 10;
const SHOP_HISTORY_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GuestState {
    #[default]
    Walking,
    Queuing,
    OnRide,
    Buying,
    Sitting,
    Leaving,
    Left,
    Lost,
}

impl GuestState {
    /// States in which the guest does not follow its path
    pub fn is_stationary(&self) -> bool {
        matches!(
            self,
            GuestState::OnRide | GuestState::Sitting | GuestState::Queuing | GuestState::Buying
        )
    }
}

/// How the guest paid to get in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketType {
    /// Each ride charges its price at boarding
    #[default]
    PayPerRide,
    /// Entry fee covers every ride
    PayGate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Highest ride intensity (0-10) the guest enjoys
    pub intensity_tolerance: u8,
    /// Time the guest is willing to stand in a queue
    pub max_queue_wait: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            intensity_tolerance: 5,
            max_queue_wait: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub position: Vec2,
    pub facing: Direction,
    pub speed: f32,
    pub state: GuestState,
    pub needs: Needs,
    pub happiness: f32,
    pub cash: Money,
    pub total_spent: Money,
    pub ticket: TicketType,
    pub preferences: Preferences,
    pub thoughts: ThoughtLog,
    /// Most recent first
    pub recent_rides: VecDeque<RideId>,
    /// Most recent first
    pub shops_visited: VecDeque<ShopId>,
    pub path: Vec<TilePos>,
    pub path_index: usize,
    /// Tile the current path ends at
    pub destination: Option<TilePos>,
    pub intent: Intent,
    pub time_in_park: f32,
    pub time_in_queue: f32,
    /// Remaining purchase time while buying
    pub activity_timer: f32,
    pub next_decision_tick: Tick,
}

impl Guest {
    pub fn new(id: GuestId, tile: TilePos, cash: Money) -> Self {
        Self {
            id,
            position: tile.to_vec2(),
            facing: Direction::default(),
            speed: 1.0,
            state: GuestState::Walking,
            needs: Needs::default(),
            happiness: 180.0,
            cash,
            total_spent: 0,
            ticket: TicketType::default(),
            preferences: Preferences::default(),
            thoughts: ThoughtLog::default(),
            recent_rides: VecDeque::with_capacity(RIDE_HISTORY_LEN),
            shops_visited: VecDeque::with_capacity(SHOP_HISTORY_LEN),
            path: Vec::new(),
            path_index: 0,
            destination: None,
            intent: Intent::None,
            time_in_park: 0.0,
            time_in_queue: 0.0,
            activity_timer: 0.0,
            next_decision_tick: 0,
        }
    }

    /// A freshly admitted guest with randomized needs and preferences
    pub fn spawn<R: Rng>(
        id: GuestId,
        entrance: TilePos,
        current_tick: Tick,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let mut guest = Self::new(id, entrance, rng.gen_range(40..=150));
        guest.speed = rng.gen_range(0.8..1.3);
        guest.ticket = config.ticket_pricing;
        guest.needs = Needs {
            hunger: rng.gen_range(50.0..120.0),
            thirst: rng.gen_range(50.0..120.0),
            bathroom: rng.gen_range(25.0..75.0),
            energy: rng.gen_range(200.0..255.0),
            nausea: 0.0,
        };
        guest.happiness = rng.gen_range(180.0..255.0);
        guest.preferences = Preferences {
            intensity_tolerance: rng.gen_range(0..=10),
            max_queue_wait: rng.gen_range(300.0..900.0),
        };
        guest.thoughts = ThoughtLog::new(config.max_thoughts);
        guest.next_decision_tick = current_tick + u64::from(id.0) % config.decision_period.max(1);
        guest
    }

    pub fn tile(&self) -> TilePos {
        self.position.tile()
    }

    pub fn has_path(&self) -> bool {
        self.path_index < self.path.len()
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_index = 0;
    }

    /// Install a new path and reset the cursor
    pub fn set_path(&mut self, path: Vec<TilePos>) {
        self.destination = path.last().copied();
        self.path = path;
        self.path_index = 0;
    }

    pub fn add_happiness(&mut self, amount: f32) {
        self.happiness = clamp_need(self.happiness + amount);
    }

    pub fn think(&mut self, thought: Thought) {
        self.thoughts.add(thought);
    }

    /// Log a thought unless the same kind is still fresh
    pub fn think_deduped(&mut self, thought: Thought, window: f64) -> bool {
        self.thoughts.add_deduped(thought, window)
    }

    pub fn remember_ride(&mut self, ride: RideId) {
        self.recent_rides.push_front(ride);
        self.recent_rides.truncate(RIDE_HISTORY_LEN);
    }

    pub fn remember_shop(&mut self, shop: ShopId) {
        self.shops_visited.push_front(shop);
        self.shops_visited.truncate(SHOP_HISTORY_LEN);
    }

    /// Whether `ride` is among the last `lookback` rides taken
    pub fn rode_recently(&self, ride: RideId, lookback: usize) -> bool {
        self.recent_rides.iter().take(lookback).any(|&r| r == ride)
    }

    /// Drop the current goal and walk on
    pub fn reset_to_walking(&mut self) {
        self.intent = Intent::None;
        self.state = GuestState::Walking;
        self.time_in_queue = 0.0;
        self.clear_path();
        self.destination = None;
    }

    pub fn is_gone(&self) -> bool {
        self.state == GuestState::Left
    }
}

//! Park rating and summary statistics

use serde::Serialize;

use crate::core::types::{Money, Tick};
use crate::ecs::world::World;
use crate::entity::guest::{Guest, GuestState};
use crate::entity::needs::NEED_MAX;
use crate::park::finance::MonthlyTotals;

/// Rating (0-1000) from the guests' average happiness
///
/// An empty park keeps whatever rating it had.
pub fn compute_park_rating(guests: &[Guest]) -> Option<u32> {
    if guests.is_empty() {
        return None;
    }
    let total: f32 = guests.iter().map(|g| g.happiness).sum();
    let average = total / guests.len() as f32;
    Some(((average / NEED_MAX) * 1000.0).round().clamp(0.0, 1000.0) as u32)
}

pub fn update_park_rating(world: &mut World) {
    if let Some(rating) = compute_park_rating(&world.guests) {
        world.park_rating = rating;
    }
}

/// Snapshot for logs and the CLI report
#[derive(Debug, Clone, Serialize)]
pub struct ParkSummary {
    pub tick: Tick,
    pub clock: f64,
    pub guests: usize,
    pub queuing: usize,
    pub riding: usize,
    pub park_rating: u32,
    pub average_happiness: f32,
    pub cash: Money,
    pub this_month: MonthlyTotals,
    pub months_closed: usize,
    pub total_riders: u64,
    pub total_shop_sales: u64,
}

impl ParkSummary {
    pub fn from_world(world: &World) -> Self {
        let count_in = |state: GuestState| world.guests.iter().filter(|g| g.state == state).count();
        let average_happiness = if world.guests.is_empty() {
            0.0
        } else {
            world.guests.iter().map(|g| g.happiness).sum::<f32>() / world.guests.len() as f32
        };

        Self {
            tick: world.current_tick,
            clock: world.clock,
            guests: world.guests.len(),
            queuing: count_in(GuestState::Queuing),
            riding: count_in(GuestState::OnRide),
            park_rating: world.park_rating,
            average_happiness,
            cash: world.finances.cash,
            this_month: world.finances.this_month.clone(),
            months_closed: world.finances.history.len(),
            total_riders: world.rides.iter().map(|r| r.total_riders).sum(),
            total_shop_sales: world.shops.iter().map(|s| s.total_sales).sum(),
        }
    }
}

//! Guest arrivals at the park gate

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::error::Result;
use crate::core::types::{GuestId, TilePos};
use crate::ecs::world::World;
use crate::entity::guest::Guest;
use crate::park::finance::LedgerCategory;

/// Chance that one spawn call admits a guest at the given rating
pub fn spawn_chance(rating: u32, base: f64, bonus: f64) -> f64 {
    (base + f64::from(rating.min(1000)) / 1000.0 * bonus).clamp(0.0, 1.0)
}

/// Maybe admit one guest through a random entrance
///
/// Called by the host once per tick. Better-rated parks attract guests
/// faster; nothing happens at capacity or without an entrance.
pub fn spawn_guests(world: &mut World) -> Option<GuestId> {
    if world.guests.len() >= world.config.max_guests || world.entrances.is_empty() {
        return None;
    }

    let chance = spawn_chance(
        world.park_rating,
        world.config.base_spawn_chance,
        world.config.rating_spawn_bonus,
    );
    if !world.rng.gen_bool(chance) {
        return None;
    }

    let entrance = *world.entrances.choose(&mut world.rng)?;
    admit_guest(world, entrance).ok()
}

/// Create a randomized guest at `entrance` and charge the entry fee
///
/// A guest who cannot pay the fee is turned away and never enters the world.
pub fn admit_guest(world: &mut World, entrance: TilePos) -> Result<GuestId> {
    let id = world.next_guest_id();
    let mut guest = Guest::spawn(id, entrance, world.current_tick, &world.config, &mut world.rng);

    if let Err(err) =
        world
            .finances
            .charge_guest(&mut guest, world.config.entry_fee, LedgerCategory::EntryFees)
    {
        debug!(guest = id.0, %err, "turned away at the gate");
        return Err(err);
    }

    debug!(guest = id.0, cash = guest.cash, x = entrance.x, y = entrance.y, "guest admitted");
    Ok(world.add_guest(guest))
}

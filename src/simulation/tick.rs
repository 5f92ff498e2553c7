//! Tick system - orchestrates simulation updates
//!
//! Each tick runs the phases in a fixed order:
//! needs -> decisions -> movement -> interactions -> ride cycles
//!
//! then drops departed guests, refreshes the park rating and closes the
//! accounting month when it has run out. Every phase sees the results of
//! the ones before it.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::types::{GuestId, Money, RideId, ShopId, TilePos};
use crate::ecs::world::World;
use crate::entity::intent::Intent;
use crate::navigation::Pathfinder;
use crate::park::finance::MonthlyTotals;
use crate::simulation::decision::run_decisions;
use crate::simulation::interaction::run_interactions;
use crate::simulation::movement::move_guest;
use crate::simulation::needs_update::update_guest_needs;
use crate::simulation::rating::update_park_rating;
use crate::simulation::ride_cycle::run_ride_cycles;

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` for logs, UI feeds and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    /// A guest committed to a new goal
    IntentChosen { guest: GuestId, intent: Intent },
    /// A guest's target closed or disappeared
    IntentCleared { guest: GuestId },
    /// No route to the chosen target
    GuestLost { guest: GuestId },
    JoinedQueue { guest: GuestId, ride: RideId },
    /// The queue was full on arrival
    QueueFull { guest: GuestId, ride: RideId },
    /// Waited longer than the guest's patience
    QueueAbandoned { guest: GuestId, ride: RideId },
    /// Could not pay the fare at the front of the queue
    BoardingRejected { guest: GuestId, ride: RideId, price: Money },
    RideStarted { ride: RideId, riders: usize },
    RideCompleted { ride: RideId, riders: usize },
    Purchase { guest: GuestId, shop: ShopId, price: Money },
    PurchaseDeclined { guest: GuestId, shop: ShopId, price: Money },
    GuestSat { guest: GuestId, bench: TilePos },
    GuestLeft { guest: GuestId, spent: Money, happiness: f32 },
    /// An accounting month ended with these totals
    MonthClosed { totals: MonthlyTotals },
}

/// Run a single simulation tick of `dt` time units
pub fn run_simulation_tick<P: Pathfinder>(
    world: &mut World,
    pathfinder: &P,
    dt: f32,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);
    world.clock += f64::from(dt);
    let now = world.clock;

    world.refresh_facilities();

    for guest in world.guests.iter_mut() {
        update_guest_needs(guest, dt, now, &world.config);
    }

    run_decisions(world, pathfinder, &mut events);

    for guest in world.guests.iter_mut() {
        move_guest(guest, dt, &world.config);
    }

    run_interactions(world, &mut events);
    run_ride_cycles(world, dt, &mut events);

    let departed = world.remove_departed();
    if !departed.is_empty() {
        debug!(count = departed.len(), remaining = world.guests.len(), "guests departed");
    }

    update_park_rating(world);

    if world.month_elapsed() {
        let totals = world.finances.this_month.clone();
        info!(
            tick = world.current_tick,
            income = totals.total(),
            cash = world.finances.cash,
            "month closed"
        );
        world.finances.roll_month();
        world.start_month();
        events.push(SimulationEvent::MonthClosed { totals });
    }

    world.current_tick += 1;
    events
}

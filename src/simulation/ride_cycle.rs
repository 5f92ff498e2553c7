//! Ride cycles - boarding, running and releasing riders

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::core::config::SimulationConfig;
use crate::core::types::{GuestId, RideId};
use crate::ecs::world::World;
use crate::entity::guest::{Guest, GuestState, TicketType};
use crate::entity::intent::Intent;
use crate::entity::needs::clamp_need;
use crate::entity::thoughts::{Thought, ThoughtKind, ThoughtSubject};
use crate::park::catalog::RideSpec;
use crate::park::finance::{Finances, LedgerCategory};
use crate::park::ride::Ride;
use crate::simulation::tick::SimulationEvent;

fn lookup<'g>(
    guests: &'g mut [Guest],
    slots: &AHashMap<GuestId, usize>,
    id: GuestId,
) -> Option<&'g mut Guest> {
    let index = *slots.get(&id)?;
    guests.get_mut(index).filter(|g| g.id == id && !g.is_gone())
}

/// Advance every open ride by `dt`
///
/// Idle rides board from the front of their queue; running rides count
/// down and release their riders when the cycle ends. Closed rides and
/// rides of an unknown type are left untouched.
pub fn run_ride_cycles(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    let now = world.clock;
    let config = &world.config;

    for ride in world.rides.iter_mut() {
        if !ride.is_open() {
            continue;
        }
        let Some(spec) = ride.spec(&world.catalog) else {
            warn!(ride = ride.id.0, kind = %ride.kind, "unknown ride type, skipping");
            continue;
        };

        if ride.running {
            ride.countdown -= dt;
            if ride.countdown <= 0.0 {
                let riders =
                    release_riders(ride, spec, &mut world.guests, &world.guest_slots, config, now);
                events.push(SimulationEvent::RideCompleted { ride: ride.id, riders });
            }
        } else if ride.queue_length() > 0 {
            board_riders(
                ride,
                spec,
                &mut world.guests,
                &world.guest_slots,
                &mut world.finances,
                now,
                events,
            );
        }
    }
}

fn board_riders(
    ride: &mut Ride,
    spec: &RideSpec,
    guests: &mut [Guest],
    slots: &AHashMap<GuestId, usize>,
    finances: &mut Finances,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let mut boarded = Vec::with_capacity(spec.capacity);

    while boarded.len() < spec.capacity {
        let Some(id) = ride.pop_front() else {
            break;
        };
        let Some(guest) = lookup(guests, slots, id) else {
            continue;
        };

        let fare = match guest.ticket {
            TicketType::PayPerRide => ride.price.max(0),
            TicketType::PayGate => 0,
        };
        if let Err(err) = finances.charge_guest(guest, fare, LedgerCategory::RideTickets) {
            debug!(guest = id.0, ride = ride.id.0, %err, "turned away at boarding");
            let subject = ThoughtSubject::Ride(ride.id);
            guest.think(Thought::new(ThoughtKind::Expensive, now).about(subject));
            guest.reset_to_walking();
            events.push(SimulationEvent::BoardingRejected { guest: id, ride: ride.id, price: fare });
            continue;
        }
        ride.total_revenue += fare;

        guest.state = GuestState::OnRide;
        guest.intent = Intent::None;
        guest.time_in_queue = 0.0;
        guest.clear_path();
        guest.destination = None;
        boarded.push(id);
    }

    if boarded.is_empty() {
        return;
    }

    debug!(ride = ride.id.0, riders = boarded.len(), "ride cycle started");
    events.push(SimulationEvent::RideStarted { ride: ride.id, riders: boarded.len() });
    ride.running = true;
    ride.countdown = spec.cycle_duration;
    ride.onboard = boarded;
}

/// Let everyone off; returns the number released
fn release_riders(
    ride: &mut Ride,
    spec: &RideSpec,
    guests: &mut [Guest],
    slots: &AHashMap<GuestId, usize>,
    config: &SimulationConfig,
    now: f64,
) -> usize {
    let riders = std::mem::take(&mut ride.onboard);
    for &id in &riders {
        let Some(guest) = lookup(guests, slots, id) else {
            continue;
        };
        apply_ride_effects(guest, ride.id, spec, config, now);
        guest.remember_ride(ride.id);
        guest.state = GuestState::Walking;
        guest.position = ride.entrance.to_vec2();
    }

    ride.total_riders += riders.len() as u64;
    ride.running = false;
    ride.countdown = 0.0;
    riders.len()
}

/// How the ride felt to this guest
///
/// Too intense rides cost happiness and add nausea proportional to their
/// intensity; otherwise exciting rides are great and the rest boring.
pub fn apply_ride_effects(
    guest: &mut Guest,
    ride: RideId,
    spec: &RideSpec,
    config: &SimulationConfig,
    now: f64,
) -> ThoughtKind {
    let limit = guest
        .preferences
        .intensity_tolerance
        .saturating_add(config.intensity_slack);

    let kind = if spec.intensity > limit {
        guest.add_happiness(-config.too_intense_penalty);
        guest.needs.nausea =
            clamp_need(guest.needs.nausea + f32::from(spec.intensity) * config.intensity_nausea_factor);
        ThoughtKind::TooIntense
    } else if spec.excitement > config.excitement_threshold {
        guest.add_happiness(config.great_ride_bonus);
        ThoughtKind::RideWasGreat
    } else {
        guest.add_happiness(config.boring_ride_bonus);
        ThoughtKind::RideWasBoring
    };

    guest.think(Thought::new(kind, now).about(ThoughtSubject::Ride(ride)));
    kind
}

//! Decision engine - what each guest should be doing next
//!
//! Guests decide on a staggered schedule (`next_decision_tick`), so only a
//! slice of the crowd pays for target resolution and pathfinding on any
//! given tick. Priorities, highest first:
//! 1. leave when unhappy or after a long visit
//! 2. relieve an urgent need
//! 3. keep doing whatever occupies the guest
//! 4. top up cash when broke
//! 5. go on a ride
//! 6. wander

use rand::Rng;
use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::types::{GuestId, RideId};
use crate::ecs::world::World;
use crate::entity::guest::{Guest, GuestState};
use crate::entity::intent::Intent;
use crate::entity::needs::NeedType;
use crate::navigation::Pathfinder;
use crate::park::catalog::Satisfies;
use crate::simulation::movement::{follow_path, mark_lost, set_guest_path};
use crate::simulation::targets::{
    find_bench_target, find_exit_target, find_ride_target, find_shop_target, find_wander_target,
    Target, TargetContext,
};
use crate::simulation::tick::SimulationEvent;

/// Outcome of the priority check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Exit,
    Facility(NeedType),
    /// Keep the current activity
    Continue,
    Cash,
    Ride,
    Wander,
}

/// Pick the guest's goal, highest priority first
pub fn choose_goal(guest: &Guest, ride_available: bool, config: &SimulationConfig) -> Goal {
    if guest.happiness < config.exit_happiness || guest.time_in_park > config.max_time_in_park {
        return Goal::Exit;
    }

    if let Some(need) = guest.needs.most_urgent(config) {
        return Goal::Facility(need);
    }

    routine_goal(guest, ride_available, config)
}

/// Goal when nothing urgent is going on
pub fn routine_goal(guest: &Guest, ride_available: bool, config: &SimulationConfig) -> Goal {
    // Don't interrupt activities or goals in progress
    let busy = matches!(
        guest.state,
        GuestState::Queuing | GuestState::OnRide | GuestState::Buying | GuestState::Sitting
    );
    if busy || !guest.intent.is_none() {
        return Goal::Continue;
    }

    if guest.cash < config.low_cash_threshold {
        return Goal::Cash;
    }

    if ride_available {
        Goal::Ride
    } else {
        Goal::Wander
    }
}

/// Run decisions for every guest due this tick
pub fn run_decisions<P: Pathfinder>(
    world: &mut World,
    pathfinder: &P,
    events: &mut Vec<SimulationEvent>,
) {
    let tick = world.current_tick;
    let now = world.clock;
    let period = world.config.decision_period.max(1);

    let ctx = TargetContext {
        grid: &world.grid,
        rides: &world.rides,
        shops: &world.shops,
        catalog: &world.catalog,
        facilities: &world.facilities,
        entrances: &world.entrances,
        config: &world.config,
        pathfinder,
    };

    let mut queue_exits: Vec<(GuestId, RideId)> = Vec::new();
    for guest in world.guests.iter_mut() {
        if guest.is_gone() || tick < guest.next_decision_tick {
            continue;
        }
        guest.next_decision_tick = tick + period;
        if guest.state == GuestState::OnRide {
            continue;
        }

        let queued_for = match (guest.state, guest.intent) {
            (GuestState::Queuing, Intent::Ride(ride)) => Some(ride),
            _ => None,
        };

        decide(guest, &ctx, &mut world.rng, now, events);

        if let Some(ride) = queued_for {
            if guest.state != GuestState::Queuing {
                queue_exits.push((guest.id, ride));
            }
        }
    }

    for (guest, ride) in queue_exits {
        if let Some(ride) = world.ride_mut(ride) {
            ride.leave_queue(guest);
        }
    }
}

/// Make one decision for one guest
pub fn decide<P: Pathfinder, R: Rng>(
    guest: &mut Guest,
    ctx: &TargetContext<'_, P>,
    rng: &mut R,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let config = ctx.config;
    let ride_available = ctx.has_eligible_ride(guest);

    match choose_goal(guest, ride_available, config) {
        Goal::Exit => head_for_exit(guest, ctx, now, events),
        Goal::Facility(need) => {
            if !seek_facility(guest, need, ctx, now, events) {
                pursue_routine(guest, ride_available, ctx, rng, now, events);
            }
        }
        _ => pursue_routine(guest, ride_available, ctx, rng, now, events),
    }
}

fn pursue_routine<P: Pathfinder, R: Rng>(
    guest: &mut Guest,
    ride_available: bool,
    ctx: &TargetContext<'_, P>,
    rng: &mut R,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let goal = routine_goal(guest, ride_available, ctx.config);
    if goal == Goal::Continue {
        return;
    }

    if goal == Goal::Cash {
        if let Some(target) = find_shop_target(ctx, guest, Satisfies::Cash) {
            commit(guest, target, ctx, now, events);
            return;
        }
    }

    if ride_available {
        // An unreachable ride leaves the guest undecided until next cycle
        if let Some(target) = find_ride_target(ctx, guest, rng) {
            commit(guest, target, ctx, now, events);
        }
        return;
    }

    if let Some(target) = find_wander_target(ctx, guest, rng) {
        commit(guest, target, ctx, now, events);
    }
}

fn head_for_exit<P: Pathfinder>(
    guest: &mut Guest,
    ctx: &TargetContext<'_, P>,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    if guest.intent == Intent::Exit && guest.state == GuestState::Leaving {
        return;
    }

    debug!(
        guest = guest.id.0,
        happiness = guest.happiness,
        time_in_park = guest.time_in_park,
        "guest heading home"
    );
    match find_exit_target(ctx, guest) {
        Some(target) => commit(guest, target, ctx, now, events),
        None => {
            mark_lost(guest, now);
            events.push(SimulationEvent::GuestLost { guest: guest.id });
        }
    }
}

/// Returns false when no facility could be found
fn seek_facility<P: Pathfinder>(
    guest: &mut Guest,
    need: NeedType,
    ctx: &TargetContext<'_, P>,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) -> bool {
    if already_serving(guest, need, ctx) {
        return true;
    }

    let target = match need {
        NeedType::Hunger => find_shop_target(ctx, guest, Satisfies::Hunger),
        NeedType::Thirst => find_shop_target(ctx, guest, Satisfies::Thirst),
        NeedType::Bathroom => find_shop_target(ctx, guest, Satisfies::Bathroom),
        NeedType::Energy | NeedType::Nausea => find_bench_target(ctx, guest),
    };

    match target {
        Some(target) => {
            commit(guest, target, ctx, now, events);
            true
        }
        None => false,
    }
}

/// Whether the guest is already taking care of `need`
fn already_serving<P: Pathfinder>(guest: &Guest, need: NeedType, ctx: &TargetContext<'_, P>) -> bool {
    match (need, guest.intent) {
        (NeedType::Energy | NeedType::Nausea, _) if guest.state == GuestState::Sitting => true,
        (NeedType::Energy | NeedType::Nausea, Intent::Bench(_)) => true,
        (_, Intent::Shop(id) | Intent::Bathroom(id)) => ctx.shop(id).is_some_and(|shop| {
            matches!(
                (need, shop.satisfies),
                (NeedType::Hunger, Satisfies::Hunger)
                    | (NeedType::Thirst, Satisfies::Thirst)
                    | (NeedType::Bathroom, Satisfies::Bathroom)
            )
        }),
        _ => false,
    }
}

/// Adopt a resolved target, routing there if needed
fn commit<P: Pathfinder>(
    guest: &mut Guest,
    target: Target,
    ctx: &TargetContext<'_, P>,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let intent = target.intent;
    match target.path {
        Some(path) => follow_path(guest, path, Some(intent)),
        None => {
            let routed = set_guest_path(
                guest,
                ctx.grid,
                ctx.pathfinder,
                target.point,
                Some(intent),
                now,
            );
            if let Err(err) = routed {
                debug!(guest = guest.id.0, %err, "no route to target");
                events.push(SimulationEvent::GuestLost { guest: guest.id });
                return;
            }
        }
    }
    events.push(SimulationEvent::IntentChosen { guest: guest.id, intent });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TilePos;
    use crate::navigation::GridPathfinder;
    use crate::park::grid::{Building, ParkGrid};

    /// Hungry guest on a corridor with a hotdog stand ahead
    fn hungry_park() -> (World, GuestId) {
        let mut grid = ParkGrid::new(10);
        grid.lay_path(TilePos::new(0, 5), TilePos::new(9, 5));
        grid.place(TilePos::new(0, 5), Building::ParkEntrance);
        let mut world = World::new(grid, SimulationConfig::default(), 9);
        world.add_shop("hotdog_stand", TilePos::new(6, 4)).unwrap();
        world.refresh_facilities();

        let id = world.place_guest(TilePos::new(2, 5), 50);
        world.guest_mut(id).unwrap().needs.hunger = 200.0;
        (world, id)
    }

    fn guest() -> Guest {
        Guest::new(GuestId(1), TilePos::new(0, 0), 100)
    }

    #[test]
    fn test_unhappy_guest_exits_first() {
        let config = SimulationConfig::default();
        let mut g = guest();
        g.happiness = 25.0;
        g.needs.bathroom = 250.0;
        assert_eq!(choose_goal(&g, true, &config), Goal::Exit);

        let mut g = guest();
        g.time_in_park = 3601.0;
        assert_eq!(choose_goal(&g, true, &config), Goal::Exit);
    }

    #[test]
    fn test_urgent_need_beats_routine() {
        let config = SimulationConfig::default();
        let mut g = guest();
        g.needs.thirst = 150.0;
        g.state = GuestState::Queuing;
        assert_eq!(choose_goal(&g, true, &config), Goal::Facility(NeedType::Thirst));

        let mut g = guest();
        g.needs.energy = 30.0;
        assert_eq!(choose_goal(&g, true, &config), Goal::Facility(NeedType::Energy));
    }

    #[test]
    fn test_busy_guest_continues() {
        let config = SimulationConfig::default();
        for state in [GuestState::Queuing, GuestState::Buying, GuestState::Sitting] {
            let mut g = guest();
            g.state = state;
            assert_eq!(choose_goal(&g, true, &config), Goal::Continue);
        }

        let mut g = guest();
        g.intent = Intent::Wander(TilePos::new(3, 3));
        assert_eq!(choose_goal(&g, true, &config), Goal::Continue);
    }

    #[test]
    fn test_idle_guest_rides_or_wanders() {
        let config = SimulationConfig::default();
        let g = guest();
        assert_eq!(choose_goal(&g, true, &config), Goal::Ride);
        assert_eq!(choose_goal(&g, false, &config), Goal::Wander);

        let mut broke = guest();
        broke.cash = 3;
        assert_eq!(choose_goal(&broke, true, &config), Goal::Cash);
    }

    #[test]
    fn test_guest_decides_only_when_due() {
        let (mut world, id) = hungry_park();
        world.guest_mut(id).unwrap().next_decision_tick = 5;
        let finder = GridPathfinder::default();

        for tick in 0..5 {
            world.current_tick = tick;
            let mut events = Vec::new();
            run_decisions(&mut world, &finder, &mut events);
            assert!(events.is_empty(), "decided early on tick {}", tick);
            assert!(world.guest(id).unwrap().intent.is_none());
        }

        world.current_tick = 5;
        let mut events = Vec::new();
        run_decisions(&mut world, &finder, &mut events);

        let guest = world.guest(id).unwrap();
        assert!(matches!(guest.intent, Intent::Shop(_)));
        assert_eq!(guest.next_decision_tick, 35);
        assert!(matches!(events[..], [SimulationEvent::IntentChosen { guest, .. }] if guest == id));
    }

    #[test]
    fn test_rider_skipped_but_rescheduled() {
        let (mut world, id) = hungry_park();
        {
            let guest = world.guest_mut(id).unwrap();
            guest.state = GuestState::OnRide;
            guest.next_decision_tick = 0;
        }
        let finder = GridPathfinder::default();

        let mut events = Vec::new();
        run_decisions(&mut world, &finder, &mut events);

        let guest = world.guest(id).unwrap();
        assert!(events.is_empty());
        assert_eq!(guest.state, GuestState::OnRide);
        assert!(guest.intent.is_none());
        assert_eq!(guest.next_decision_tick, 30);

        // Not due again until the next period
        world.current_tick = 29;
        world.guest_mut(id).unwrap().state = GuestState::Walking;
        run_decisions(&mut world, &finder, &mut events);
        assert!(events.is_empty());

        world.current_tick = 30;
        run_decisions(&mut world, &finder, &mut events);
        assert!(matches!(world.guest(id).unwrap().intent, Intent::Shop(_)));
    }
}

//! Interaction resolver - what happens when a guest reaches its target

use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::error::{ParkError, Result};
use crate::core::types::{RideId, ShopId, TilePos};
use crate::ecs::world::World;
use crate::entity::guest::{Guest, GuestState};
use crate::entity::intent::Intent;
use crate::entity::needs::NeedType;
use crate::entity::thoughts::{Thought, ThoughtKind, ThoughtSubject};
use crate::park::catalog::{ContentCatalog, Satisfies};
use crate::park::finance::{Finances, LedgerCategory};
use crate::park::grid::ParkGrid;
use crate::park::ride::Ride;
use crate::park::shop::Shop;
use crate::simulation::tick::SimulationEvent;

/// Need relieved by a purchase: (need, relief, happiness gained)
pub fn relief_for(satisfies: Satisfies) -> Option<(NeedType, f32, f32)> {
    match satisfies {
        Satisfies::Hunger => Some((NeedType::Hunger, 180.0, 20.0)),
        Satisfies::Thirst => Some((NeedType::Thirst, 200.0, 18.0)),
        Satisfies::Bathroom => Some((NeedType::Bathroom, 230.0, 15.0)),
        Satisfies::Cash => None,
    }
}

/// Whether the guest stands close enough to use something at `anchor`
///
/// A guest whose path ran out next to its destination also counts, since
/// facilities themselves usually sit off the path network.
pub fn has_arrived(guest: &Guest, anchor: TilePos, config: &SimulationConfig) -> bool {
    let range = config.interaction_range;
    if guest.position.chebyshev(&anchor.to_vec2()) <= range {
        return true;
    }
    !guest.has_path()
        && guest
            .destination
            .is_some_and(|d| guest.position.chebyshev(&d.to_vec2()) <= range)
}

/// Resolve intents for every guest
pub fn run_interactions(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let now = world.clock;
    let config = &world.config;

    for guest in world.guests.iter_mut() {
        if guest.is_gone() || guest.state == GuestState::OnRide {
            continue;
        }

        match guest.intent {
            Intent::None => {}
            Intent::Ride(ride) => {
                resolve_ride(guest, ride, &mut world.rides, &world.catalog, config, now, events)
            }
            Intent::Shop(shop) | Intent::Bathroom(shop) => resolve_shop(
                guest,
                shop,
                &mut world.shops,
                &mut world.finances,
                config,
                now,
                events,
            ),
            Intent::Bench(bench) => resolve_bench(guest, bench, &world.grid, config, events),
            Intent::Wander(point) => {
                if has_arrived(guest, point, config) {
                    guest.intent = Intent::None;
                }
            }
            Intent::Exit => {
                if guest.destination.is_some_and(|d| has_arrived(guest, d, config)) {
                    guest.state = GuestState::Left;
                    debug!(guest = guest.id.0, spent = guest.total_spent, "guest left the park");
                    events.push(SimulationEvent::GuestLeft {
                        guest: guest.id,
                        spent: guest.total_spent,
                        happiness: guest.happiness,
                    });
                }
            }
        }
    }
}

fn clear_invalid(guest: &mut Guest, err: &ParkError, events: &mut Vec<SimulationEvent>) {
    debug!(guest = guest.id.0, intent = ?guest.intent, %err, "dropping intent");
    guest.reset_to_walking();
    events.push(SimulationEvent::IntentCleared { guest: guest.id });
}

fn resolve_ride(
    guest: &mut Guest,
    id: RideId,
    rides: &mut [Ride],
    catalog: &ContentCatalog,
    config: &SimulationConfig,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let Some(ride) = rides.iter_mut().find(|r| r.id == id) else {
        clear_invalid(guest, &ParkError::IntentInvalid, events);
        return;
    };
    let spec = match ride.spec(catalog) {
        Some(spec) if ride.is_open() => spec,
        _ => {
            ride.leave_queue(guest.id);
            clear_invalid(guest, &ParkError::IntentInvalid, events);
            return;
        }
    };

    if guest.state == GuestState::Queuing {
        if guest.time_in_queue > guest.preferences.max_queue_wait {
            ride.leave_queue(guest.id);
            guest.think_deduped(
                Thought::new(ThoughtKind::LongQueue, now).about(ThoughtSubject::Ride(id)),
                config.thought_dedup_window,
            );
            guest.reset_to_walking();
            events.push(SimulationEvent::QueueAbandoned { guest: guest.id, ride: id });
        }
        return;
    }

    if !has_arrived(guest, ride.entrance, config) || ride.holds(guest.id) {
        return;
    }

    if !ride.has_queue_room(spec.max_queue_length) {
        guest.reset_to_walking();
        events.push(SimulationEvent::QueueFull { guest: guest.id, ride: id });
        return;
    }

    ride.enqueue(guest.id);
    guest.state = GuestState::Queuing;
    guest.time_in_queue = 0.0;
    guest.clear_path();
    events.push(SimulationEvent::JoinedQueue { guest: guest.id, ride: id });
}

fn open_shop(shops: &mut [Shop], id: ShopId) -> Result<&mut Shop> {
    shops
        .iter_mut()
        .find(|s| s.id == id && s.is_open())
        .ok_or(ParkError::IntentInvalid)
}

fn resolve_shop(
    guest: &mut Guest,
    id: ShopId,
    shops: &mut [Shop],
    finances: &mut Finances,
    config: &SimulationConfig,
    now: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let shop = match open_shop(shops, id) {
        Ok(shop) => shop,
        Err(err) => {
            clear_invalid(guest, &err, events);
            return;
        }
    };
    if !has_arrived(guest, shop.location, config) {
        return;
    }

    let price = shop.price_for(guest.ticket);
    match purchase(guest, shop, finances, config, now) {
        Ok(()) => events.push(SimulationEvent::Purchase { guest: guest.id, shop: id, price }),
        Err(err) => {
            debug!(guest = guest.id.0, shop = id.0, %err, "purchase declined");
            guest.think(Thought::new(ThoughtKind::Expensive, now).about(ThoughtSubject::Shop(id)));
            guest.reset_to_walking();
            events.push(SimulationEvent::PurchaseDeclined { guest: guest.id, shop: id, price });
        }
    }
}

/// Sell the guest one visit to `shop`
///
/// The charge is atomic; a guest who cannot pay is left untouched.
/// Pay-gate guests are not charged for restrooms.
pub fn purchase(
    guest: &mut Guest,
    shop: &mut Shop,
    finances: &mut Finances,
    config: &SimulationConfig,
    now: f64,
) -> Result<()> {
    let category = if shop.is_bathroom() {
        LedgerCategory::FacilityUsage
    } else {
        LedgerCategory::ShopSales
    };
    let price = shop.price_for(guest.ticket);
    finances.charge_guest(guest, price, category)?;

    match relief_for(shop.satisfies) {
        Some((need, amount, joy)) => {
            guest.needs.satisfy(need, amount);
            guest.add_happiness(joy);
        }
        None => guest.cash += config.cash_withdrawal,
    }

    shop.total_sales += 1;
    shop.total_revenue += price;
    shop.last_visited_at = Some(now);
    guest.remember_shop(shop.id);
    guest.think(Thought::new(ThoughtKind::GoodValue, now).about(ThoughtSubject::Shop(shop.id)));

    guest.intent = Intent::None;
    guest.clear_path();
    guest.state = GuestState::Buying;
    guest.activity_timer = config.purchase_duration;
    Ok(())
}

fn resolve_bench(
    guest: &mut Guest,
    bench: TilePos,
    grid: &ParkGrid,
    config: &SimulationConfig,
    events: &mut Vec<SimulationEvent>,
) {
    if !grid.tile(bench).is_some_and(|t| t.is_bench()) {
        clear_invalid(guest, &ParkError::IntentInvalid, events);
        return;
    }
    if !has_arrived(guest, bench, config) {
        return;
    }

    guest.needs.satisfy(NeedType::Energy, config.bench_energy_restore);
    guest.intent = Intent::None;
    guest.clear_path();
    guest.state = GuestState::Sitting;
    events.push(SimulationEvent::GuestSat { guest: guest.id, bench });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GuestId, Vec2};
    use crate::entity::guest::TicketType;

    fn guest_at(x: f32, y: f32) -> Guest {
        let mut guest = Guest::new(GuestId(1), TilePos::new(0, 0), 50);
        guest.position = Vec2::new(x, y);
        guest
    }

    #[test]
    fn test_arrival_by_range_or_destination() {
        let config = SimulationConfig::default();
        let shop = TilePos::new(5, 5);

        assert!(has_arrived(&guest_at(4.3, 5.6), shop, &config));
        assert!(!has_arrived(&guest_at(3.9, 5.0), shop, &config));

        let mut g = guest_at(5.0, 3.0);
        g.destination = Some(TilePos::new(5, 3));
        assert!(has_arrived(&g, shop, &config));

        g.set_path(vec![TilePos::new(5, 3)]);
        assert!(!has_arrived(&g, shop, &config));
    }

    #[test]
    fn test_purchase_relieves_hunger_and_books_sale() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let mut shop = Shop::new(ShopId(1), "hotdog_stand", Satisfies::Hunger, 8, TilePos::new(5, 5));
        let mut g = guest_at(5.0, 5.0);
        g.needs.hunger = 200.0;
        g.happiness = 100.0;
        g.intent = Intent::Shop(ShopId(1));

        purchase(&mut g, &mut shop, &mut finances, &config, 42.0).unwrap();

        assert_eq!(g.needs.hunger, 20.0);
        assert_eq!(g.happiness, 120.0);
        assert_eq!(g.cash, 42);
        assert_eq!(g.state, GuestState::Buying);
        assert!(g.intent.is_none());
        assert_eq!(shop.total_sales, 1);
        assert_eq!(shop.total_revenue, 8);
        assert_eq!(shop.last_visited_at, Some(42.0));
        assert_eq!(finances.this_month.shop_sales, 8);
        assert_eq!(g.shops_visited.front(), Some(&ShopId(1)));
    }

    #[test]
    fn test_bathroom_books_facility_usage() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let mut shop = Shop::new(ShopId(2), "paid_toilet", Satisfies::Bathroom, 2, TilePos::new(1, 1));
        let mut g = guest_at(1.0, 1.0);
        g.needs.bathroom = 240.0;

        purchase(&mut g, &mut shop, &mut finances, &config, 1.0).unwrap();
        assert_eq!(g.needs.bathroom, 10.0);
        assert_eq!(finances.this_month.facility_usage, 2);
        assert_eq!(finances.this_month.shop_sales, 0);
    }

    #[test]
    fn test_cash_machine_hands_out_money() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let mut atm = Shop::new(ShopId(3), "atm", Satisfies::Cash, 0, TilePos::new(1, 1));
        let mut g = guest_at(1.0, 1.0);
        g.cash = 2;

        purchase(&mut g, &mut atm, &mut finances, &config, 1.0).unwrap();
        assert_eq!(g.cash, 52);
        assert_eq!(finances.cash, 0);
    }

    #[test]
    fn test_unaffordable_purchase_changes_nothing() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(100);
        let mut shop = Shop::new(ShopId(1), "burger_bar", Satisfies::Hunger, 12, TilePos::new(5, 5));
        let mut g = guest_at(5.0, 5.0);
        g.cash = 5;
        g.needs.hunger = 200.0;

        assert!(purchase(&mut g, &mut shop, &mut finances, &config, 1.0).is_err());
        assert_eq!(g.cash, 5);
        assert_eq!(g.needs.hunger, 200.0);
        assert_eq!(finances.cash, 100);
        assert_eq!(shop.total_sales, 0);
    }

    #[test]
    fn test_free_restroom_still_good_value() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let mut wc = Shop::new(ShopId(4), "restroom", Satisfies::Bathroom, 0, TilePos::new(1, 1));
        let mut g = guest_at(1.0, 1.0);
        g.needs.bathroom = 200.0;

        purchase(&mut g, &mut wc, &mut finances, &config, 3.0).unwrap();
        assert_eq!(g.thoughts.count_of(ThoughtKind::GoodValue), 1);
        assert_eq!(g.cash, 50);
    }

    #[test]
    fn test_every_purchase_is_remembered() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let spot = TilePos::new(2, 2);
        let mut hotdog = Shop::new(ShopId(1), "hotdog_stand", Satisfies::Hunger, 8, spot);
        let mut soda = Shop::new(ShopId(2), "soda_stand", Satisfies::Thirst, 5, spot);
        let mut g = guest_at(2.0, 2.0);

        purchase(&mut g, &mut hotdog, &mut finances, &config, 1.0).unwrap();
        purchase(&mut g, &mut soda, &mut finances, &config, 10.0).unwrap();

        assert_eq!(g.thoughts.count_of(ThoughtKind::GoodValue), 2);
        assert_eq!(g.thoughts.latest().unwrap().subject, Some(ThoughtSubject::Shop(ShopId(2))));
    }

    #[test]
    fn test_declined_purchases_each_complain() {
        let mut world = World::new(ParkGrid::new(6), SimulationConfig::default(), 1);
        let shop = world.add_shop("burger_bar", TilePos::new(3, 3)).unwrap();
        let id = world.place_guest(TilePos::new(3, 3), 2);
        let mut events = Vec::new();

        for clock in [5.0, 12.0] {
            world.clock = clock;
            world.guest_mut(id).unwrap().intent = Intent::Shop(shop);
            run_interactions(&mut world, &mut events);
        }

        let guest = world.guest(id).unwrap();
        assert_eq!(guest.thoughts.count_of(ThoughtKind::Expensive), 2);
        assert_eq!(world.finances.this_month.total(), 0);
    }

    #[test]
    fn test_gate_ticket_covers_restrooms_only() {
        let config = SimulationConfig::default();
        let mut finances = Finances::new(0);
        let spot = TilePos::new(1, 1);
        let mut wc = Shop::new(ShopId(5), "paid_toilet", Satisfies::Bathroom, 2, spot);
        let mut hotdog = Shop::new(ShopId(6), "hotdog_stand", Satisfies::Hunger, 8, spot);

        let mut g = guest_at(1.0, 1.0);
        g.ticket = TicketType::PayGate;
        g.cash = 10;

        purchase(&mut g, &mut wc, &mut finances, &config, 1.0).unwrap();
        assert_eq!(g.cash, 10);
        assert_eq!(wc.total_revenue, 0);
        assert_eq!(finances.this_month.facility_usage, 0);

        purchase(&mut g, &mut hotdog, &mut finances, &config, 2.0).unwrap();
        assert_eq!(g.cash, 2);
        assert_eq!(finances.this_month.shop_sales, 8);

        let mut per_ride = guest_at(1.0, 1.0);
        per_ride.cash = 10;
        purchase(&mut per_ride, &mut wc, &mut finances, &config, 3.0).unwrap();
        assert_eq!(per_ride.cash, 8);
        assert_eq!(finances.this_month.facility_usage, 2);
    }
}

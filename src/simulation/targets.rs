//! Target resolution - turns a goal into a concrete walkable destination

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::types::{ShopId, TilePos};
use crate::entity::guest::Guest;
use crate::entity::intent::Intent;
use crate::navigation::Pathfinder;
use crate::park::catalog::{ContentCatalog, RideSpec, Satisfies};
use crate::park::grid::ParkGrid;
use crate::park::ride::Ride;
use crate::park::shop::Shop;
use crate::spatial::facility_index::{FacilityCategory, FacilityIndex, FacilityRef};

/// Read-only view of the park used while resolving targets
pub struct TargetContext<'a, P: Pathfinder> {
    pub grid: &'a ParkGrid,
    pub rides: &'a [Ride],
    pub shops: &'a [Shop],
    pub catalog: &'a ContentCatalog,
    pub facilities: &'a FacilityIndex,
    pub entrances: &'a [TilePos],
    pub config: &'a SimulationConfig,
    pub pathfinder: &'a P,
}

/// A resolved goal
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub intent: Intent,
    /// Walkable tile the guest heads for
    pub point: TilePos,
    /// Route already computed during resolution
    pub path: Option<Vec<TilePos>>,
}

impl Target {
    fn at(intent: Intent, point: TilePos) -> Self {
        Self { intent, point, path: None }
    }
}

impl<'a, P: Pathfinder> TargetContext<'a, P> {
    pub fn shop(&self, id: ShopId) -> Option<&'a Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    /// Rides the guest could join right now: open, known, not ridden
    /// recently and with room in the queue
    pub fn eligible_rides(&self, guest: &Guest) -> Vec<(&'a Ride, &'a RideSpec)> {
        self.rides
            .iter()
            .filter(|ride| ride.is_open())
            .filter(|ride| !guest.rode_recently(ride.id, self.config.recent_ride_lookback))
            .filter_map(|ride| ride.spec(self.catalog).map(|spec| (ride, spec)))
            .filter(|(ride, spec)| ride.has_queue_room(spec.max_queue_length))
            .collect()
    }

    pub fn has_eligible_ride(&self, guest: &Guest) -> bool {
        !self.eligible_rides(guest).is_empty()
    }

    /// Largest Manhattan distance inside the grid
    fn grid_reach(&self) -> u32 {
        (self.grid.size() as u32).saturating_mul(2)
    }
}

/// Nearest open, affordable shop of the given kind with a walkable tile nearby
pub fn find_shop_target<P: Pathfinder>(
    ctx: &TargetContext<'_, P>,
    guest: &Guest,
    satisfies: Satisfies,
) -> Option<Target> {
    let config = ctx.config;
    ctx.facilities
        .within(FacilityCategory::Shop(satisfies), guest.tile(), ctx.grid_reach())
        .into_iter()
        .filter_map(|hit| match hit.facility {
            FacilityRef::Shop(id) => ctx.shop(id),
            FacilityRef::Bench => None,
        })
        .filter(|shop| shop.is_open() && shop.affordable_by(guest.ticket, guest.cash))
        .take(config.shop_candidates)
        .find_map(|shop| {
            let point = ctx.pathfinder.find_nearest_walkable(
                ctx.grid,
                shop.location,
                config.shop_search_radius,
            )?;
            let intent = if shop.is_bathroom() {
                Intent::Bathroom(shop.id)
            } else {
                Intent::Shop(shop.id)
            };
            Some(Target::at(intent, point))
        })
}

pub fn find_bench_target<P: Pathfinder>(ctx: &TargetContext<'_, P>, guest: &Guest) -> Option<Target> {
    let config = ctx.config;
    let bench = ctx
        .facilities
        .nearest(FacilityCategory::Bench, guest.tile(), config.bench_search_radius)?;
    let point = ctx
        .pathfinder
        .find_nearest_walkable(ctx.grid, bench.pos, config.bench_walkable_radius)?;
    Some(Target::at(Intent::Bench(bench.pos), point))
}

/// Pick a ride for the guest and route to it
///
/// Eligible rides are filtered by intensity, ranked by distance plus
/// weighted queue length, and one of the best few is picked at random.
/// The remaining top candidates are tried in rank order if the pick turns
/// out to be unreachable.
pub fn find_ride_target<P: Pathfinder, R: Rng>(
    ctx: &TargetContext<'_, P>,
    guest: &Guest,
    rng: &mut R,
) -> Option<Target> {
    let config = ctx.config;
    let mut ranked = rank_rides(ctx, guest);
    ranked.truncate(config.ride_candidates);
    if ranked.is_empty() {
        return None;
    }

    let shortlist = ranked.len().min(config.ride_shortlist);
    let pick = rng.gen_range(0..shortlist);
    let order = std::iter::once(pick).chain((0..ranked.len()).filter(|&i| i != pick));

    let start = guest.tile();
    for i in order {
        let ride = ranked[i];
        let Some(point) =
            ctx.pathfinder
                .find_nearest_walkable(ctx.grid, ride.entrance, config.ride_search_radius)
        else {
            continue;
        };
        if let Some(path) = ctx.pathfinder.find_path(ctx.grid, start, point) {
            return Some(Target {
                intent: Intent::Ride(ride.id),
                point,
                path: Some(path),
            });
        }
    }
    None
}

/// Eligible rides in preference order
pub fn rank_rides<'a, P: Pathfinder>(ctx: &TargetContext<'a, P>, guest: &Guest) -> Vec<&'a Ride> {
    let config = ctx.config;
    let eligible = ctx.eligible_rides(guest);
    if eligible.is_empty() {
        return Vec::new();
    }

    let limit = guest
        .preferences
        .intensity_tolerance
        .saturating_add(config.intensity_slack);
    let mut suitable: Vec<&Ride> = eligible
        .iter()
        .filter(|(_, spec)| spec.intensity <= limit)
        .map(|(ride, _)| *ride)
        .collect();

    if suitable.is_empty() {
        let gentlest = eligible
            .iter()
            .min_by_key(|(ride, spec)| (spec.intensity, ride.id))
            .filter(|(_, spec)| spec.intensity < config.low_intensity_fallback);
        let fallback = gentlest.or(eligible.first()).map(|(ride, _)| *ride);
        suitable.extend(fallback);
        return suitable;
    }

    let score = |ride: &Ride| {
        guest.position.distance(&ride.entrance.to_vec2())
            + config.queue_length_weight * ride.queue_length() as f32
    };
    suitable.sort_by(|a, b| score(*a).total_cmp(&score(*b)).then(a.id.cmp(&b.id)));
    suitable
}

/// Random walkable tile near the guest
pub fn find_wander_target<P: Pathfinder, R: Rng>(
    ctx: &TargetContext<'_, P>,
    guest: &Guest,
    rng: &mut R,
) -> Option<Target> {
    let config = ctx.config;
    let radius = config.wander_radius.max(0);
    let max = ctx.grid.size() as i32 - 1;
    if max < 0 {
        return None;
    }

    let here = guest.tile();
    let raw = here.offset(rng.gen_range(-radius..=radius), rng.gen_range(-radius..=radius));
    let clamped = TilePos::new(raw.x.clamp(0, max), raw.y.clamp(0, max));
    let point = ctx
        .pathfinder
        .find_nearest_walkable(ctx.grid, clamped, config.wander_walkable_radius)?;
    Some(Target::at(Intent::Wander(point), point))
}

/// Nearest park entrance, which doubles as the exit
pub fn find_exit_target<P: Pathfinder>(ctx: &TargetContext<'_, P>, guest: &Guest) -> Option<Target> {
    let here = guest.tile();
    let entrance = ctx
        .entrances
        .iter()
        .min_by_key(|e| (e.manhattan(&here), e.y, e.x))?;
    let point = ctx
        .pathfinder
        .find_nearest_walkable(ctx.grid, *entrance, ctx.config.shop_search_radius)?;
    Some(Target::at(Intent::Exit, point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GuestId;
    use crate::ecs::world::World;
    use crate::navigation::GridPathfinder;
    use crate::park::grid::Building;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// 20x20 park with a path along row 10 and an entrance at its west end
    fn world() -> World {
        let mut grid = ParkGrid::new(20);
        grid.lay_path(TilePos::new(0, 10), TilePos::new(19, 10));
        grid.place(TilePos::new(0, 10), Building::ParkEntrance);
        World::new(grid, SimulationConfig::default(), 3)
    }

    fn ctx<'a>(world: &'a World, finder: &'a GridPathfinder) -> TargetContext<'a, GridPathfinder> {
        TargetContext {
            grid: &world.grid,
            rides: &world.rides,
            shops: &world.shops,
            catalog: &world.catalog,
            facilities: &world.facilities,
            entrances: &world.entrances,
            config: &world.config,
            pathfinder: finder,
        }
    }

    fn guest_at(x: i32, y: i32) -> Guest {
        Guest::new(GuestId(1), TilePos::new(x, y), 100)
    }

    #[test]
    fn test_shop_target_prefers_nearest_affordable() {
        let mut world = world();
        let near = world.add_shop("burger_bar", TilePos::new(6, 9)).unwrap();
        let far = world.add_shop("hotdog_stand", TilePos::new(15, 9)).unwrap();
        world.add_shop("soda_stand", TilePos::new(4, 9)).unwrap();
        world.refresh_facilities();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        let target = find_shop_target(&ctx, &guest_at(3, 10), Satisfies::Hunger).unwrap();
        assert_eq!(target.intent, Intent::Shop(near));
        assert_eq!(target.point, TilePos::new(6, 10));

        // Cannot afford the burger (12), hotdog (8) is fine
        let mut poor = guest_at(3, 10);
        poor.cash = 9;
        let target = find_shop_target(&ctx, &poor, Satisfies::Hunger).unwrap();
        assert_eq!(target.intent, Intent::Shop(far));
    }

    #[test]
    fn test_bathroom_target_uses_bathroom_intent() {
        let mut world = world();
        let wc = world.add_shop("restroom", TilePos::new(8, 11)).unwrap();
        world.refresh_facilities();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        let target = find_shop_target(&ctx, &guest_at(1, 10), Satisfies::Bathroom).unwrap();
        assert_eq!(target.intent, Intent::Bathroom(wc));
    }

    #[test]
    fn test_bench_outside_radius_is_ignored() {
        let mut world = world();
        world.grid.place(TilePos::new(18, 11), Building::Bench);
        world.refresh_facilities();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        assert!(find_bench_target(&ctx, &guest_at(0, 10)).is_none());
        let target = find_bench_target(&ctx, &guest_at(10, 10)).unwrap();
        assert_eq!(target.intent, Intent::Bench(TilePos::new(18, 11)));
        assert_eq!(target.point, TilePos::new(18, 10));
    }

    #[test]
    fn test_intense_rides_filtered_by_tolerance() {
        let mut world = world();
        let coaster = world.add_ride("coaster", TilePos::new(3, 11)).unwrap();
        let carousel = world.add_ride("carousel", TilePos::new(12, 11)).unwrap();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        let mut timid = guest_at(2, 10);
        timid.preferences.intensity_tolerance = 2;
        assert_eq!(
            rank_rides(&ctx, &timid).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![carousel]
        );

        let mut brave = guest_at(2, 10);
        brave.preferences.intensity_tolerance = 10;
        assert_eq!(
            rank_rides(&ctx, &brave).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![coaster, carousel]
        );
    }

    #[test]
    fn test_fallback_to_first_ride_when_all_too_intense() {
        let mut world = world();
        let tower = world.add_ride("drop_tower", TilePos::new(3, 11)).unwrap();
        world.add_ride("coaster", TilePos::new(6, 11)).unwrap();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        let mut timid = guest_at(2, 10);
        timid.preferences.intensity_tolerance = 0;
        // Gentlest is intensity 8, above the fallback cutoff
        assert_eq!(
            rank_rides(&ctx, &timid).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![tower]
        );
    }

    #[test]
    fn test_recent_and_closed_rides_are_not_eligible() {
        let mut world = world();
        let a = world.add_ride("carousel", TilePos::new(3, 11)).unwrap();
        let b = world.add_ride("teacups", TilePos::new(6, 11)).unwrap();
        world.ride_mut(b).unwrap().close();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);

        let mut guest = guest_at(2, 10);
        assert_eq!(ctx.eligible_rides(&guest).len(), 1);
        guest.remember_ride(a);
        assert!(!ctx.has_eligible_ride(&guest));
    }

    #[test]
    fn test_ride_target_carries_path() {
        let mut world = world();
        let ride = world.add_ride("ferris_wheel", TilePos::new(9, 12)).unwrap();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let target = find_ride_target(&ctx, &guest_at(1, 10), &mut rng).unwrap();
        assert_eq!(target.intent, Intent::Ride(ride));
        assert_eq!(target.point, TilePos::new(9, 10));
        let path = target.path.unwrap();
        assert_eq!(path.first(), Some(&TilePos::new(1, 10)));
        assert_eq!(path.last(), Some(&TilePos::new(9, 10)));
    }

    #[test]
    fn test_wander_and_exit_land_on_walkable_tiles() {
        let world = world();
        let finder = GridPathfinder::default();
        let ctx = ctx(&world, &finder);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let guest = guest_at(10, 10);

        for _ in 0..20 {
            if let Some(target) = find_wander_target(&ctx, &guest, &mut rng) {
                assert!(world.grid.is_walkable(target.point));
                assert_eq!(target.intent, Intent::Wander(target.point));
            }
        }

        let exit = find_exit_target(&ctx, &guest).unwrap();
        assert_eq!(exit.intent, Intent::Exit);
        assert_eq!(exit.point, TilePos::new(0, 10));
    }
}

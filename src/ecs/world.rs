//! Park world - owns every guest, ride, shop and the ledger between ticks

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{GuestId, RideId, ShopId, Tick, TilePos};
use crate::entity::guest::Guest;
use crate::park::catalog::ContentCatalog;
use crate::park::finance::Finances;
use crate::park::grid::{Building, ParkGrid};
use crate::park::ride::Ride;
use crate::park::shop::Shop;
use crate::spatial::facility_index::FacilityIndex;

/// The simulated park
///
/// The host loop owns the world exclusively and hands it to
/// `run_simulation_tick`; renderers and persistence read it between ticks.
#[derive(Clone)]
pub struct World {
    pub current_tick: Tick,
    /// Simulated time units elapsed
    pub clock: f64,
    pub config: SimulationConfig,
    pub catalog: ContentCatalog,
    pub grid: ParkGrid,
    pub guests: Vec<Guest>,
    pub rides: Vec<Ride>,
    pub shops: Vec<Shop>,
    pub finances: Finances,
    /// 0-1000, derived from guest happiness
    pub park_rating: u32,
    /// Deterministic source of every random draw
    pub rng: ChaCha8Rng,
    pub(crate) facilities: FacilityIndex,
    pub(crate) guest_slots: AHashMap<GuestId, usize>,
    pub(crate) entrances: Vec<TilePos>,
    month_started_at: f64,
    next_guest_id: u32,
    next_ride_id: u32,
    next_shop_id: u32,
}

impl World {
    pub fn new(grid: ParkGrid, config: SimulationConfig, seed: u64) -> Self {
        let entrances = grid.entrances();
        let facilities = FacilityIndex::new(config.facility_cell_size);
        Self {
            current_tick: 0,
            clock: 0.0,
            finances: Finances::new(config.starting_cash),
            config,
            catalog: ContentCatalog::with_defaults(),
            grid,
            guests: Vec::new(),
            rides: Vec::new(),
            shops: Vec::new(),
            park_rating: 500,
            rng: ChaCha8Rng::seed_from_u64(seed),
            facilities,
            guest_slots: AHashMap::new(),
            entrances,
            month_started_at: 0.0,
            next_guest_id: 1,
            next_ride_id: 1,
            next_shop_id: 1,
        }
    }

    pub fn with_catalog(mut self, catalog: ContentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Swap in a new grid snapshot between ticks
    pub fn set_grid(&mut self, grid: ParkGrid) {
        self.entrances = grid.entrances();
        self.grid = grid;
    }

    pub fn entrances(&self) -> &[TilePos] {
        &self.entrances
    }

    /// Build a catalog ride and mark its entrance on the grid
    pub fn add_ride(&mut self, kind: &str, entrance: TilePos) -> Result<RideId> {
        let id = RideId(self.next_ride_id);
        let ride = Ride::from_catalog(id, kind, entrance, &self.catalog)?;
        self.next_ride_id += 1;
        self.grid.place(entrance, Building::RideEntrance(id));
        self.rides.push(ride);
        Ok(id)
    }

    /// Build a catalog shop and mark it on the grid
    pub fn add_shop(&mut self, kind: &str, location: TilePos) -> Result<ShopId> {
        let id = ShopId(self.next_shop_id);
        let shop = Shop::from_catalog(id, kind, location, &self.catalog)?;
        self.next_shop_id += 1;
        self.grid.place(location, Building::Shop(id));
        self.shops.push(shop);
        Ok(id)
    }

    pub fn next_guest_id(&mut self) -> GuestId {
        let id = GuestId(self.next_guest_id);
        self.next_guest_id += 1;
        id
    }

    /// Insert a guest; its id must be unique
    pub fn add_guest(&mut self, guest: Guest) -> GuestId {
        let id = guest.id;
        self.next_guest_id = self.next_guest_id.max(id.0 + 1);
        self.guest_slots.insert(id, self.guests.len());
        self.guests.push(guest);
        id
    }

    /// Plain guest with default needs standing on `tile`
    pub fn place_guest(&mut self, tile: TilePos, cash: i64) -> GuestId {
        let id = self.next_guest_id();
        let mut guest = Guest::new(id, tile, cash);
        guest.ticket = self.config.ticket_pricing;
        let period = self.config.decision_period.max(1);
        guest.next_decision_tick = self.current_tick + u64::from(id.0) % period;
        self.add_guest(guest)
    }

    pub fn guest_index(&self, id: GuestId) -> Option<usize> {
        self.guest_slots.get(&id).copied()
    }

    pub fn guest(&self, id: GuestId) -> Option<&Guest> {
        self.guest_index(id).map(|i| &self.guests[i])
    }

    pub fn guest_mut(&mut self, id: GuestId) -> Option<&mut Guest> {
        self.guest_index(id).map(move |i| &mut self.guests[i])
    }

    pub fn ride(&self, id: RideId) -> Option<&Ride> {
        self.rides.iter().find(|r| r.id == id)
    }

    pub fn ride_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.rides.iter_mut().find(|r| r.id == id)
    }

    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    pub fn shop_mut(&mut self, id: ShopId) -> Option<&mut Shop> {
        self.shops.iter_mut().find(|s| s.id == id)
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    /// Re-index benches and shops from the current snapshot
    pub fn refresh_facilities(&mut self) {
        self.facilities.rebuild(&self.grid, self.shops.iter());
    }

    /// Drop guests that have left the park; returns them
    pub(crate) fn remove_departed(&mut self) -> Vec<Guest> {
        if !self.guests.iter().any(Guest::is_gone) {
            return Vec::new();
        }
        let (gone, staying): (Vec<Guest>, Vec<Guest>) =
            std::mem::take(&mut self.guests).into_iter().partition(Guest::is_gone);
        self.guests = staying;
        self.guest_slots = self
            .guests
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id, i))
            .collect();
        gone
    }

    /// Whether the clock has run past the end of the accounting month
    pub(crate) fn month_elapsed(&self) -> bool {
        self.clock - self.month_started_at >= self.config.month_length
    }

    pub(crate) fn start_month(&mut self) {
        self.month_started_at += self.config.month_length;
    }
}

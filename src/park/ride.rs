//! Rides: queue, onboard set and cycle state

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::{GuestId, Money, RideId, TilePos};
use crate::park::catalog::{ContentCatalog, RideSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FacilityStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    /// Catalog key
    pub kind: String,
    pub status: FacilityStatus,
    pub price: Money,
    pub entrance: TilePos,
    queue: VecDeque<GuestId>,
    queue_length: usize,
    pub onboard: Vec<GuestId>,
    pub running: bool,
    /// Time left in the current cycle
    pub countdown: f32,
    pub total_riders: u64,
    pub total_revenue: Money,
}

impl Ride {
    pub fn new(id: RideId, kind: impl Into<String>, entrance: TilePos, price: Money) -> Self {
        Self {
            id,
            kind: kind.into(),
            status: FacilityStatus::Open,
            price,
            entrance,
            queue: VecDeque::new(),
            queue_length: 0,
            onboard: Vec::new(),
            running: false,
            countdown: 0.0,
            total_riders: 0,
            total_revenue: 0,
        }
    }

    /// A ride priced at its catalog default
    pub fn from_catalog(
        id: RideId,
        kind: &str,
        entrance: TilePos,
        catalog: &ContentCatalog,
    ) -> Result<Self> {
        let spec = catalog.ride(kind).ok_or(ParkError::UnknownRideType(id))?;
        Ok(Self::new(id, kind, entrance, spec.price))
    }

    pub fn spec<'a>(&self, catalog: &'a ContentCatalog) -> Option<&'a RideSpec> {
        catalog.ride(&self.kind)
    }

    pub fn is_open(&self) -> bool {
        self.status == FacilityStatus::Open
    }

    pub fn queue(&self) -> &VecDeque<GuestId> {
        &self.queue
    }

    pub fn queue_length(&self) -> usize {
        self.queue_length
    }

    pub fn has_queue_room(&self, max_queue_length: usize) -> bool {
        self.queue_length < max_queue_length
    }

    pub fn enqueue(&mut self, guest: GuestId) {
        self.queue.push_back(guest);
        self.queue_length = self.queue.len();
    }

    pub fn pop_front(&mut self) -> Option<GuestId> {
        let guest = self.queue.pop_front();
        self.queue_length = self.queue.len();
        guest
    }

    /// Take a guest out of the queue wherever it stands
    pub fn leave_queue(&mut self, guest: GuestId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|&g| g != guest);
        self.queue_length = self.queue.len();
        self.queue_length != before
    }

    pub fn is_queued(&self, guest: GuestId) -> bool {
        self.queue.contains(&guest)
    }

    pub fn holds(&self, guest: GuestId) -> bool {
        self.is_queued(guest) || self.onboard.contains(&guest)
    }

    pub fn close(&mut self) {
        self.status = FacilityStatus::Closed;
    }

    pub fn open(&mut self) {
        self.status = FacilityStatus::Open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_length_tracks_queue() {
        let mut ride = Ride::new(RideId(1), "carousel", TilePos::new(2, 2), 10);
        ride.enqueue(GuestId(1));
        ride.enqueue(GuestId(2));
        ride.enqueue(GuestId(3));
        assert_eq!(ride.queue_length(), 3);

        assert_eq!(ride.pop_front(), Some(GuestId(1)));
        assert!(ride.leave_queue(GuestId(3)));
        assert!(!ride.leave_queue(GuestId(3)));
        assert_eq!(ride.queue_length(), ride.queue().len());
        assert_eq!(ride.queue_length(), 1);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let catalog = ContentCatalog::with_defaults();
        let result = Ride::from_catalog(RideId(4), "warp_gate", TilePos::default(), &catalog);
        assert!(matches!(result, Err(ParkError::UnknownRideType(RideId(4)))));

        let ride = Ride::from_catalog(RideId(5), "coaster", TilePos::default(), &catalog).unwrap();
        assert_eq!(ride.price, 30);
    }
}

//! Guest intents: what a guest is currently trying to do

use serde::{Deserialize, Serialize};

use crate::core::types::{RideId, ShopId, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intent {
    #[default]
    None,
    Ride(RideId),
    Shop(ShopId),
    Bathroom(ShopId),
    Bench(TilePos),
    Wander(TilePos),
    Exit,
}

impl Intent {
    pub fn is_none(&self) -> bool {
        matches!(self, Intent::None)
    }

    pub fn ride(&self) -> Option<RideId> {
        match self {
            Intent::Ride(id) => Some(*id),
            _ => None,
        }
    }

    /// Shop targeted by a shop or bathroom intent
    pub fn shop(&self) -> Option<ShopId> {
        match self {
            Intent::Shop(id) | Intent::Bathroom(id) => Some(*id),
            _ => None,
        }
    }
}

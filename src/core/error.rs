use thiserror::Error;

use crate::core::types::{GuestId, Money, RideId, ShopId, TilePos};

#[derive(Error, Debug)]
pub enum ParkError {
    #[error("Intent target is missing or closed")]
    IntentInvalid,

    #[error("No path from {from:?} to {to:?}")]
    Unreachable { from: TilePos, to: TilePos },

    #[error("Guest {guest:?} cannot afford {price} (has {cash})")]
    CannotAfford {
        guest: GuestId,
        price: Money,
        cash: Money,
    },

    #[error("Ride {0:?} has no catalog definition")]
    UnknownRideType(RideId),

    #[error("Shop {0:?} has no catalog definition")]
    UnknownShopType(ShopId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParkError>;

//! Park facilities, content tables and the ledger

pub mod catalog;
pub mod finance;
pub mod grid;
pub mod layout;
pub mod ride;
pub mod shop;

pub use catalog::{ContentCatalog, RideSpec, Satisfies, ShopSpec};
pub use finance::{Finances, LedgerCategory, MonthlyTotals};
pub use grid::{Building, ParkGrid, Terrain, Tile};
pub use ride::{FacilityStatus, Ride};
pub use shop::Shop;

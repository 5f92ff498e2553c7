pub mod facility_index;
pub mod grid;

pub use facility_index::{FacilityCategory, FacilityHit, FacilityIndex, FacilityRef};
pub use grid::Grid;

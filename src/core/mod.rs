pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ParkError, Result};

pub mod decision;
pub mod interaction;
pub mod movement;
pub mod needs_update;
pub mod rating;
pub mod ride_cycle;
pub mod spawn;
pub mod targets;
pub mod tick;

pub use decision::{choose_goal, run_decisions, Goal};
pub use interaction::{has_arrived, purchase, run_interactions};
pub use movement::{move_guest, set_guest_path};
pub use needs_update::{generate_thoughts, update_guest_needs};
pub use rating::{compute_park_rating, ParkSummary};
pub use ride_cycle::{apply_ride_effects, run_ride_cycles};
pub use spawn::{admit_guest, spawn_guests};
pub use tick::{run_simulation_tick, SimulationEvent};

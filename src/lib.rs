//! Park Sim - guest, ride and shop simulation for a theme park

pub mod core;
pub mod ecs;
pub mod entity;
pub mod navigation;
pub mod park;
pub mod simulation;
pub mod spatial;

//! Path assignment and waypoint following

use crate::core::config::SimulationConfig;
use crate::core::error::{ParkError, Result};
use crate::core::types::{Direction, TilePos};
use crate::entity::guest::{Guest, GuestState};
use crate::entity::intent::Intent;
use crate::entity::thoughts::{Thought, ThoughtKind};
use crate::navigation::Pathfinder;
use crate::park::grid::ParkGrid;

/// Route the guest to `target`
///
/// On success the path cursor is reset and the guest walks (or keeps
/// leaving if it is heading for the exit). When no route exists the guest
/// becomes lost.
pub fn set_guest_path<P: Pathfinder>(
    guest: &mut Guest,
    grid: &ParkGrid,
    pathfinder: &P,
    target: TilePos,
    intent: Option<Intent>,
    now: f64,
) -> Result<()> {
    let start = guest.tile();
    match pathfinder.find_path(grid, start, target) {
        Some(path) => {
            follow_path(guest, path, intent);
            Ok(())
        }
        None => {
            mark_lost(guest, now);
            Err(ParkError::Unreachable { from: start, to: target })
        }
    }
}

/// Install an already computed route
pub fn follow_path(guest: &mut Guest, path: Vec<TilePos>, intent: Option<Intent>) {
    if let Some(intent) = intent {
        guest.intent = intent;
    }
    guest.set_path(path);
    guest.time_in_queue = 0.0;
    guest.state = if guest.intent == Intent::Exit {
        GuestState::Leaving
    } else {
        GuestState::Walking
    };
}

pub fn mark_lost(guest: &mut Guest, now: f64) {
    guest.clear_path();
    guest.destination = None;
    guest.intent = Intent::None;
    guest.state = GuestState::Lost;
    guest.think(Thought::new(ThoughtKind::Lost, now));
}

/// Advance the guest along its path
///
/// Covers `speed * dt * movement_scale` tiles, passing through as many
/// waypoints as that distance allows. Stationary guests stay put.
pub fn move_guest(guest: &mut Guest, dt: f32, config: &SimulationConfig) {
    if dt <= 0.0 || guest.state.is_stationary() || !guest.has_path() {
        return;
    }

    let mut budget = guest.speed * dt * config.movement_scale;
    while guest.has_path() {
        let waypoint = guest.path[guest.path_index].to_vec2();
        let to = waypoint - guest.position;
        let distance = to.length();

        if distance < config.waypoint_arrival {
            guest.path_index += 1;
            continue;
        }
        if budget <= 0.0 {
            break;
        }

        if let Some(facing) = Direction::from_vector(to) {
            guest.facing = facing;
        }
        if budget >= distance {
            guest.position = waypoint;
            guest.path_index += 1;
            budget -= distance;
        } else {
            guest.position = guest.position + to.normalize() * budget;
            break;
        }
    }

    if !guest.has_path() {
        guest.clear_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GuestId, Vec2};
    use crate::navigation::GridPathfinder;

    fn corridor() -> ParkGrid {
        let mut grid = ParkGrid::new(10);
        grid.lay_path(TilePos::new(0, 2), TilePos::new(9, 2));
        grid
    }

    #[test]
    fn test_set_path_walks() {
        let grid = corridor();
        let mut guest = Guest::new(GuestId(1), TilePos::new(0, 2), 10);

        set_guest_path(
            &mut guest,
            &grid,
            &GridPathfinder::default(),
            TilePos::new(5, 2),
            Some(Intent::Wander(TilePos::new(5, 2))),
            0.0,
        )
        .unwrap();

        assert_eq!(guest.state, GuestState::Walking);
        assert_eq!(guest.path_index, 0);
        assert_eq!(guest.path.len(), 6);
        assert_eq!(guest.destination, Some(TilePos::new(5, 2)));
        assert_eq!(guest.intent, Intent::Wander(TilePos::new(5, 2)));
    }

    #[test]
    fn test_exit_path_keeps_leaving() {
        let grid = corridor();
        let mut guest = Guest::new(GuestId(1), TilePos::new(3, 2), 10);

        set_guest_path(
            &mut guest,
            &grid,
            &GridPathfinder::default(),
            TilePos::new(0, 2),
            Some(Intent::Exit),
            0.0,
        )
        .unwrap();
        assert_eq!(guest.state, GuestState::Leaving);
    }

    #[test]
    fn test_unreachable_target_marks_lost() {
        let grid = corridor();
        let mut guest = Guest::new(GuestId(1), TilePos::new(0, 2), 10);

        let result = set_guest_path(
            &mut guest,
            &grid,
            &GridPathfinder::default(),
            TilePos::new(5, 7),
            Some(Intent::Wander(TilePos::new(5, 7))),
            12.0,
        );

        assert!(matches!(result, Err(ParkError::Unreachable { .. })));
        assert_eq!(guest.state, GuestState::Lost);
        assert_eq!(guest.thoughts.count_of(ThoughtKind::Lost), 1);
        assert!(guest.intent.is_none());
    }

    #[test]
    fn test_move_guest_reaches_end_and_clears_path() {
        let config = SimulationConfig::default();
        let mut guest = Guest::new(GuestId(1), TilePos::new(0, 2), 10);
        guest.set_path(vec![TilePos::new(0, 2), TilePos::new(1, 2), TilePos::new(2, 2)]);

        // 0.02 tiles per time unit at speed 1
        move_guest(&mut guest, 25.0, &config);
        assert!((guest.position.x - 0.5).abs() < 1e-4);
        assert_eq!(guest.facing, Direction::East);
        assert!(guest.has_path());

        move_guest(&mut guest, 100.0, &config);
        assert_eq!(guest.position, Vec2::new(2.0, 2.0));
        assert!(!guest.has_path());
        assert!(guest.path.is_empty());
        assert_eq!(guest.destination, Some(TilePos::new(2, 2)));
    }

    #[test]
    fn test_stationary_guest_does_not_move() {
        let config = SimulationConfig::default();
        let mut guest = Guest::new(GuestId(1), TilePos::new(0, 2), 10);
        guest.set_path(vec![TilePos::new(1, 2)]);
        guest.state = GuestState::Queuing;

        move_guest(&mut guest, 50.0, &config);
        assert_eq!(guest.position, Vec2::new(0.0, 2.0));
    }
}

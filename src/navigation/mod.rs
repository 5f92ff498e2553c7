//! Pathfinding collaborator
//!
//! The simulation only depends on the [`Pathfinder`] contract: deterministic
//! answers for identical grids and endpoints, `None` when no route exists.
//! [`GridPathfinder`] is the default implementation used by the binary.

use ::pathfinding::prelude::astar;

use crate::core::types::TilePos;
use crate::park::grid::ParkGrid;

const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub trait Pathfinder {
    /// Ordered waypoints from `start` to `goal`, both included
    fn find_path(&self, grid: &ParkGrid, start: TilePos, goal: TilePos) -> Option<Vec<TilePos>>;

    /// Nearest walkable tile within `max_radius` (Manhattan) of `origin`
    fn find_nearest_walkable(&self, grid: &ParkGrid, origin: TilePos, max_radius: u32) -> Option<TilePos>;
}

/// A* over path and queue tiles
#[derive(Debug, Clone)]
pub struct GridPathfinder {
    /// Longer routes count as unreachable
    pub max_path_length: usize,
}

impl Default for GridPathfinder {
    fn default() -> Self {
        Self { max_path_length: 200 }
    }
}

impl GridPathfinder {
    pub fn new(max_path_length: usize) -> Self {
        Self { max_path_length }
    }
}

impl Pathfinder for GridPathfinder {
    fn find_path(&self, grid: &ParkGrid, start: TilePos, goal: TilePos) -> Option<Vec<TilePos>> {
        if !grid.in_bounds(start) || !grid.is_walkable(goal) {
            return None;
        }
        if start == goal {
            return Some(vec![goal]);
        }

        let result = astar(
            &start,
            |pos| {
                let pos = *pos;
                NEIGHBORS
                    .iter()
                    .map(move |&(dx, dy)| pos.offset(dx, dy))
                    .filter(|next| grid.is_walkable(*next))
                    .map(|next| (next, 1u32))
                    .collect::<Vec<_>>()
            },
            |pos| pos.manhattan(&goal),
            |pos| *pos == goal,
        );

        result
            .map(|(path, _cost)| path)
            .filter(|path| path.len() <= self.max_path_length + 1)
    }

    fn find_nearest_walkable(&self, grid: &ParkGrid, origin: TilePos, max_radius: u32) -> Option<TilePos> {
        if grid.is_walkable(origin) {
            return Some(origin);
        }

        // Expanding Manhattan rings; first hit in row-major order wins a ring
        for radius in 1..=max_radius as i32 {
            let mut best: Option<TilePos> = None;
            for dy in -radius..=radius {
                let rest = radius - dy.abs();
                for dx in [-rest, rest] {
                    let pos = origin.offset(dx, dy);
                    if grid.is_walkable(pos) {
                        best = match best {
                            Some(b) if (b.y, b.x) <= (pos.y, pos.x) => Some(b),
                            _ => Some(pos),
                        };
                    }
                    if rest == 0 {
                        break;
                    }
                }
            }
            if best.is_some() {
                return best;
            }
        }
        None
    }
}

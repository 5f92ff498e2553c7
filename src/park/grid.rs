//! Read-only park tile grid snapshot

use serde::{Deserialize, Serialize};

use crate::core::types::{RideId, ShopId, TilePos};
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grass,
    Water,
    Sand,
    Rock,
}

/// What stands on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    Bench,
    RideEntrance(RideId),
    Shop(ShopId),
    ParkEntrance,
    Scenery,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub path: bool,
    pub queue: bool,
    pub building: Option<Building>,
}

impl Tile {
    /// Guests walk on path and queue tiles only
    pub fn is_walkable(&self) -> bool {
        self.path || self.queue
    }

    pub fn is_bench(&self) -> bool {
        matches!(self.building, Some(Building::Bench))
    }
}

/// Square tile grid the simulation reads each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkGrid {
    tiles: Grid<Tile>,
}

impl ParkGrid {
    pub fn new(size: usize) -> Self {
        Self { tiles: Grid::new(size, size) }
    }

    pub fn size(&self) -> usize {
        self.tiles.width
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        self.tiles.in_bounds(pos)
    }

    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    pub fn tile_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.tiles.get_mut(pos)
    }

    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    pub fn set_path(&mut self, pos: TilePos) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.path = true;
        }
    }

    /// Lay a straight path between two tiles sharing a row or column
    pub fn lay_path(&mut self, from: TilePos, to: TilePos) {
        let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
        let mut pos = from;
        self.set_path(pos);
        while pos != to {
            if pos.x != to.x {
                pos.x += dx;
            } else {
                pos.y += dy;
            }
            self.set_path(pos);
        }
    }

    pub fn place(&mut self, pos: TilePos, building: Building) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.building = Some(building);
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, &Tile)> + '_ {
        self.tiles.iter()
    }

    /// Park entrance tiles, in row-major order
    pub fn entrances(&self) -> Vec<TilePos> {
        self.tiles()
            .filter(|(_, t)| matches!(t.building, Some(Building::ParkEntrance)))
            .map(|(p, _)| p)
            .collect()
    }
}

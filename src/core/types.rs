//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for guests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuestId(pub u32);

/// Unique identifier for rides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RideId(pub u32);

/// Unique identifier for shops and stalls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShopId(pub u32);

/// Game tick counter (simulation step index)
pub type Tick = u64;

/// Whole currency units
pub type Money = i64;

/// Integer tile coordinate on the park grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Continuous position of the tile's anchor point
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// 2D position in tile units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Max of the per-axis distances
    pub fn chebyshev(&self, other: &Self) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }

    /// Tile the position currently stands on
    pub fn tile(&self) -> TilePos {
        TilePos::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Facing direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    #[default]
    South,
    West,
}

impl Direction {
    /// Dominant-axis direction of a movement vector (+y is south)
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if v.x.abs() < f32::EPSILON && v.y.abs() < f32::EPSILON {
            return None;
        }
        Some(if v.x.abs() >= v.y.abs() {
            if v.x > 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else if v.y > 0.0 {
            Direction::South
        } else {
            Direction::North
        })
    }
}

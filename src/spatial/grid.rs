//! Generic grid for tile data

use serde::{Deserialize, Serialize};

use crate::core::types::TilePos;

/// Dense row-major 2D grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: TilePos) -> Option<&T> {
        self.index(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: TilePos) -> Option<&mut T> {
        self.index(pos).map(move |i| &mut self.data[i])
    }

    #[inline]
    pub fn set(&mut self, pos: TilePos, value: T) {
        if let Some(i) = self.index(pos) {
            self.data[i] = value;
        }
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, &T)> + '_ {
        let width = self.width;
        self.data.iter().enumerate().map(move |(i, cell)| {
            (TilePos::new((i % width) as i32, (i / width) as i32), cell)
        })
    }
}

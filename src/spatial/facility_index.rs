//! Bucketed spatial index of park facilities
//!
//! Facilities are hashed into square cells per category so that
//! "nearest bench" and "nearest food stall" only look at the cells
//! overlapping the search radius instead of scanning the whole grid.

use ahash::AHashMap;

use crate::core::types::{ShopId, TilePos};
use crate::park::catalog::Satisfies;
use crate::park::grid::ParkGrid;
use crate::park::shop::Shop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityCategory {
    Bench,
    Shop(Satisfies),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityRef {
    Bench,
    Shop(ShopId),
}

/// A facility found by a query, with its Manhattan distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilityHit {
    pub pos: TilePos,
    pub facility: FacilityRef,
    pub distance: u32,
}

#[derive(Debug, Clone)]
pub struct FacilityIndex {
    cell_size: i32,
    cells: AHashMap<(FacilityCategory, i32, i32), Vec<(TilePos, FacilityRef)>>,
    len: usize,
}

impl FacilityIndex {
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            cells: AHashMap::new(),
            len: 0,
        }
    }

    #[inline]
    fn cell_coord(&self, pos: TilePos) -> (i32, i32) {
        (pos.x.div_euclid(self.cell_size), pos.y.div_euclid(self.cell_size))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    pub fn insert(&mut self, category: FacilityCategory, pos: TilePos, facility: FacilityRef) {
        let (cx, cy) = self.cell_coord(pos);
        self.cells.entry((category, cx, cy)).or_default().push((pos, facility));
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rebuild from the grid's benches and the given shops
    pub fn rebuild<'a>(&mut self, grid: &ParkGrid, shops: impl Iterator<Item = &'a Shop>) {
        self.clear();
        for (pos, tile) in grid.tiles() {
            if tile.is_bench() {
                self.insert(FacilityCategory::Bench, pos, FacilityRef::Bench);
            }
        }
        for shop in shops {
            self.insert(
                FacilityCategory::Shop(shop.satisfies),
                shop.location,
                FacilityRef::Shop(shop.id),
            );
        }
    }

    /// Facilities of `category` within Manhattan `radius`, nearest first
    ///
    /// Ties are broken by row then column so results are stable.
    pub fn within(&self, category: FacilityCategory, origin: TilePos, radius: u32) -> Vec<FacilityHit> {
        let reach = radius.min(1 << 20) as i32;
        let (min_cx, min_cy) = self.cell_coord(origin.offset(-reach, -reach));
        let (max_cx, max_cy) = self.cell_coord(origin.offset(reach, reach));

        let mut hits: Vec<FacilityHit> = Vec::new();
        for cx in min_cx..=max_cx {
            for cy in min_cy..=max_cy {
                let Some(entries) = self.cells.get(&(category, cx, cy)) else {
                    continue;
                };
                hits.extend(entries.iter().filter_map(|&(pos, facility)| {
                    let distance = origin.manhattan(&pos);
                    (distance <= radius).then_some(FacilityHit { pos, facility, distance })
                }));
            }
        }

        hits.sort_by_key(|h| (h.distance, h.pos.y, h.pos.x));
        hits
    }

    pub fn nearest(&self, category: FacilityCategory, origin: TilePos, radius: u32) -> Option<FacilityHit> {
        self.within(category, origin, radius).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::park::grid::Building;

    #[test]
    fn test_nearest_bench_respects_radius() {
        let mut grid = ParkGrid::new(40);
        grid.place(TilePos::new(30, 30), Building::Bench);
        grid.place(TilePos::new(5, 9), Building::Bench);

        let mut index = FacilityIndex::new(8);
        index.rebuild(&grid, std::iter::empty());
        assert_eq!(index.len(), 2);

        let hit = index.nearest(FacilityCategory::Bench, TilePos::new(2, 2), 12).unwrap();
        assert_eq!(hit.pos, TilePos::new(5, 9));
        assert_eq!(hit.distance, 10);

        assert!(index.nearest(FacilityCategory::Bench, TilePos::new(2, 2), 9).is_none());
    }

    #[test]
    fn test_shops_bucketed_by_category() {
        let grid = ParkGrid::new(20);
        let shops = vec![
            Shop::new(ShopId(1), "soda_stand", Satisfies::Thirst, 5, TilePos::new(3, 3)),
            Shop::new(ShopId(2), "hotdog_stand", Satisfies::Hunger, 8, TilePos::new(1, 1)),
            Shop::new(ShopId(3), "burger_bar", Satisfies::Hunger, 12, TilePos::new(10, 10)),
        ];
        let mut index = FacilityIndex::new(4);
        index.rebuild(&grid, shops.iter());

        let hits = index.within(FacilityCategory::Shop(Satisfies::Hunger), TilePos::new(0, 0), 100);
        let ids: Vec<_> = hits.iter().map(|h| h.facility).collect();
        assert_eq!(ids, vec![FacilityRef::Shop(ShopId(2)), FacilityRef::Shop(ShopId(3))]);
    }

    #[test]
    fn test_negative_origin_cells() {
        let mut index = FacilityIndex::new(8);
        index.insert(FacilityCategory::Bench, TilePos::new(0, 0), FacilityRef::Bench);
        let hit = index.nearest(FacilityCategory::Bench, TilePos::new(-3, -3), 6);
        assert!(hit.is_some());
    }
}

//! Ready-made park layouts for the runner, benches and tests

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::TilePos;
use crate::ecs::world::World;
use crate::park::catalog::ContentCatalog;
use crate::park::grid::{Building, ParkGrid};

pub const DEMO_SIZE: usize = 32;

/// Path network of the demo park
///
/// A main avenue from the west gate, a rectangular loop around the
/// centre and a north-south spine.
pub fn demo_grid() -> ParkGrid {
    let mut grid = ParkGrid::new(DEMO_SIZE);
    grid.lay_path(TilePos::new(0, 16), TilePos::new(31, 16));
    grid.lay_path(TilePos::new(4, 8), TilePos::new(28, 8));
    grid.lay_path(TilePos::new(4, 24), TilePos::new(28, 24));
    grid.lay_path(TilePos::new(4, 8), TilePos::new(4, 24));
    grid.lay_path(TilePos::new(28, 8), TilePos::new(28, 24));
    grid.lay_path(TilePos::new(16, 8), TilePos::new(16, 24));
    grid.place(TilePos::new(0, 16), Building::ParkEntrance);

    for bench in [(15, 9), (17, 23), (27, 12), (5, 22), (10, 17)] {
        grid.place(TilePos::new(bench.0, bench.1), Building::Bench);
    }
    for tree in [(2, 14), (2, 18), (30, 14), (30, 18)] {
        grid.place(TilePos::new(tree.0, tree.1), Building::Scenery);
    }
    grid
}

/// Demo park with every default ride and shop type built
pub fn demo_park(config: SimulationConfig, catalog: ContentCatalog, seed: u64) -> Result<World> {
    let mut world = World::new(demo_grid(), config, seed).with_catalog(catalog);

    let rides = [
        ("carousel", (6, 7)),
        ("teacups", (12, 7)),
        ("ferris_wheel", (20, 7)),
        ("log_flume", (26, 7)),
        ("drop_tower", (10, 25)),
        ("coaster", (22, 25)),
    ];
    for (kind, (x, y)) in rides {
        world.add_ride(kind, TilePos::new(x, y))?;
    }

    let shops = [
        ("hotdog_stand", (8, 15)),
        ("soda_stand", (12, 17)),
        ("burger_bar", (20, 15)),
        ("lemonade_stand", (24, 17)),
        ("restroom", (17, 12)),
        ("restroom", (3, 20)),
        ("atm", (5, 15)),
    ];
    for (kind, (x, y)) in shops {
        world.add_shop(kind, TilePos::new(x, y))?;
    }

    Ok(world)
}

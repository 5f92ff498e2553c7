//! Read-only content tables for ride and shop types
//!
//! Rides and shops reference their type by name. The simulation looks the
//! name up every tick; an entity whose type is missing is skipped instead of
//! aborting the tick, so partially-defined content keeps working.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Money;

/// Stats shared by every ride of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSpec {
    /// Riders per cycle
    pub capacity: usize,
    /// Time units one cycle runs
    pub cycle_duration: f32,
    /// 0-10
    pub intensity: u8,
    /// 0-10
    pub excitement: u8,
    pub price: Money,
    pub max_queue_length: usize,
}

/// What a shop relieves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Satisfies {
    Hunger,
    Thirst,
    Bathroom,
    Cash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopSpec {
    pub satisfies: Satisfies,
    pub price: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentCatalog {
    pub rides: AHashMap<String, RideSpec>,
    pub shops: AHashMap<String, ShopSpec>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in ride and shop set
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        let rides = [
            ("carousel", 12, 60.0, 1, 3, 10),
            ("teacups", 8, 45.0, 3, 4, 12),
            ("ferris_wheel", 16, 120.0, 2, 5, 15),
            ("log_flume", 8, 90.0, 5, 6, 20),
            ("drop_tower", 8, 40.0, 8, 8, 25),
            ("coaster", 20, 120.0, 9, 9, 30),
        ];
        for (name, capacity, cycle_duration, intensity, excitement, price) in rides {
            catalog.rides.insert(
                name.to_string(),
                RideSpec {
                    capacity,
                    cycle_duration,
                    intensity,
                    excitement,
                    price,
                    max_queue_length: 30,
                },
            );
        }

        let shops = [
            ("hotdog_stand", Satisfies::Hunger, 8),
            ("burger_bar", Satisfies::Hunger, 12),
            ("soda_stand", Satisfies::Thirst, 5),
            ("lemonade_stand", Satisfies::Thirst, 6),
            ("restroom", Satisfies::Bathroom, 0),
            ("atm", Satisfies::Cash, 0),
        ];
        for (name, satisfies, price) in shops {
            catalog.shops.insert(name.to_string(), ShopSpec { satisfies, price });
        }

        catalog
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn ride(&self, kind: &str) -> Option<&RideSpec> {
        self.rides.get(kind)
    }

    pub fn shop(&self, kind: &str) -> Option<&ShopSpec> {
        self.shops.get(kind)
    }
}

//! Guest needs that drive park behavior

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;

/// Upper bound of every need and of happiness
pub const NEED_MAX: f32 = 255.0;

/// Clamp a need-like scalar into [0, 255]
#[inline]
pub fn clamp_need(value: f32) -> f32 {
    value.clamp(0.0, NEED_MAX)
}

/// Physical needs of a guest
///
/// For hunger, thirst, bathroom and nausea higher is worse.
/// Energy runs the other way: 255 is fully rested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub thirst: f32,
    pub bathroom: f32,
    pub energy: f32,
    pub nausea: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: 50.0,
            thirst: 50.0,
            bathroom: 30.0,
            energy: 220.0,
            nausea: 0.0,
        }
    }
}

impl Needs {
    /// Advance needs by `dt` time units (called each tick)
    pub fn decay(&mut self, dt: f32, config: &SimulationConfig) {
        self.hunger += config.hunger_rate * dt;
        self.thirst += config.thirst_rate * dt;
        self.bathroom += config.bathroom_rate * dt;
        self.energy -= config.energy_rate * dt;
        self.nausea -= config.nausea_recovery_rate * dt;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.hunger = clamp_need(self.hunger);
        self.thirst = clamp_need(self.thirst);
        self.bathroom = clamp_need(self.bathroom);
        self.energy = clamp_need(self.energy);
        self.nausea = clamp_need(self.nausea);
    }

    /// Happiness lost per time unit given the current needs
    pub fn happiness_penalty(&self, config: &SimulationConfig) -> f32 {
        let mut penalty = 0.0;
        if self.hunger > config.need_high {
            penalty += config.hunger_penalty;
        }
        if self.thirst > config.need_high {
            penalty += config.thirst_penalty;
        }
        if self.bathroom > config.need_high {
            penalty += config.bathroom_penalty;
        }
        if self.energy < config.need_low {
            penalty += config.energy_penalty;
        }
        if self.nausea > config.need_medium {
            penalty += config.nausea_penalty;
        }
        penalty
    }

    /// Most urgent need, if any
    ///
    /// Bathroom, thirst, hunger and nausea compete on value; the first in
    /// that order wins a tie. Low energy only matters when none of them is
    /// above the medium threshold.
    pub fn most_urgent(&self, config: &SimulationConfig) -> Option<NeedType> {
        let ranked = [
            (NeedType::Bathroom, self.bathroom),
            (NeedType::Thirst, self.thirst),
            (NeedType::Hunger, self.hunger),
            (NeedType::Nausea, self.nausea),
        ];

        let (top, value) = ranked
            .into_iter()
            .fold(ranked[0], |best, next| if next.1 > best.1 { next } else { best });

        if value > config.need_medium {
            return Some(top);
        }
        if self.energy < config.need_low {
            return Some(NeedType::Energy);
        }
        None
    }

    /// Relieve a need by `amount`
    pub fn satisfy(&mut self, need: NeedType, amount: f32) {
        match need {
            NeedType::Hunger => self.hunger = clamp_need(self.hunger - amount),
            NeedType::Thirst => self.thirst = clamp_need(self.thirst - amount),
            NeedType::Bathroom => self.bathroom = clamp_need(self.bathroom - amount),
            NeedType::Nausea => self.nausea = clamp_need(self.nausea - amount),
            NeedType::Energy => self.energy = clamp_need(self.energy + amount),
        }
    }

    pub fn in_bounds(&self) -> bool {
        [self.hunger, self.thirst, self.bathroom, self.energy, self.nausea]
            .iter()
            .all(|v| (0.0..=NEED_MAX).contains(v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Hunger,
    Thirst,
    Bathroom,
    Energy,
    Nausea,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> Needs {
        Needs {
            hunger: 10.0,
            thirst: 10.0,
            bathroom: 10.0,
            energy: 200.0,
            nausea: 0.0,
        }
    }

    #[test]
    fn test_decay_rates() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        needs.nausea = 50.0;
        needs.decay(100.0, &config);

        assert!((needs.hunger - 18.0).abs() < 1e-3);
        assert!((needs.thirst - 22.0).abs() < 1e-3);
        assert!((needs.bathroom - 16.0).abs() < 1e-3);
        assert!((needs.energy - 196.0).abs() < 1e-3);
        assert!((needs.nausea - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_decay_clamps() {
        let config = SimulationConfig::default();
        let mut needs = Needs {
            hunger: 254.0,
            thirst: 254.0,
            bathroom: 254.0,
            energy: 1.0,
            nausea: 0.5,
        };
        needs.decay(1000.0, &config);
        assert_eq!(needs.hunger, 255.0);
        assert_eq!(needs.energy, 0.0);
        assert_eq!(needs.nausea, 0.0);
    }

    #[test]
    fn test_no_urgent_need_when_calm() {
        let config = SimulationConfig::default();
        assert_eq!(calm().most_urgent(&config), None);
    }

    #[test]
    fn test_highest_need_wins() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        needs.hunger = 150.0;
        needs.thirst = 170.0;
        assert_eq!(needs.most_urgent(&config), Some(NeedType::Thirst));
    }

    #[test]
    fn test_ties_prefer_bathroom_then_thirst() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        needs.hunger = 150.0;
        needs.thirst = 150.0;
        needs.bathroom = 150.0;
        assert_eq!(needs.most_urgent(&config), Some(NeedType::Bathroom));

        needs.bathroom = 10.0;
        assert_eq!(needs.most_urgent(&config), Some(NeedType::Thirst));
    }

    #[test]
    fn test_low_energy_only_when_nothing_else() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        needs.energy = 30.0;
        assert_eq!(needs.most_urgent(&config), Some(NeedType::Energy));

        needs.nausea = 140.0;
        assert_eq!(needs.most_urgent(&config), Some(NeedType::Nausea));
    }

    #[test]
    fn test_medium_threshold_is_exclusive() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        needs.hunger = 128.0;
        assert_eq!(needs.most_urgent(&config), None);
    }

    #[test]
    fn test_penalty_sums_active_conditions() {
        let config = SimulationConfig::default();
        let mut needs = calm();
        assert_eq!(needs.happiness_penalty(&config), 0.0);

        needs.hunger = 200.0;
        needs.energy = 10.0;
        let expected = config.hunger_penalty + config.energy_penalty;
        assert!((needs.happiness_penalty(&config) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_satisfy_floors_at_zero() {
        let mut needs = calm();
        needs.satisfy(NeedType::Hunger, 180.0);
        assert_eq!(needs.hunger, 0.0);
        needs.satisfy(NeedType::Energy, 500.0);
        assert_eq!(needs.energy, 255.0);
    }
}

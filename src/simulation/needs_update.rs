//! Need decay, happiness drift and need-driven thoughts

use crate::core::config::SimulationConfig;
use crate::entity::guest::{Guest, GuestState};
use crate::entity::thoughts::{Thought, ThoughtKind};

/// Advance one guest's needs by `dt` time units
///
/// `now` is the simulation clock used to stamp thoughts. A zero (or
/// negative) `dt` leaves the guest untouched.
pub fn update_guest_needs(guest: &mut Guest, dt: f32, now: f64, config: &SimulationConfig) {
    if dt <= 0.0 || guest.is_gone() {
        return;
    }

    guest.needs.decay(dt, config);
    let penalty = guest.needs.happiness_penalty(config);
    guest.add_happiness(-penalty * dt);

    guest.time_in_park += dt;

    match guest.state {
        GuestState::Queuing => guest.time_in_queue += dt,
        GuestState::Buying => {
            guest.activity_timer -= dt;
            if guest.activity_timer <= 0.0 {
                guest.activity_timer = 0.0;
                guest.state = GuestState::Walking;
            }
        }
        GuestState::Sitting => {
            guest.needs.energy = (guest.needs.energy + config.sit_energy_rate * dt).min(255.0);
            guest.add_happiness(config.sit_happiness_rate * dt);
            if guest.needs.energy > config.sit_release_energy {
                guest.state = GuestState::Walking;
            }
        }
        _ => {}
    }

    generate_thoughts(guest, now, config);
}

/// Log thoughts for needs past their thresholds
///
/// Each kind is logged at most once per dedup window.
pub fn generate_thoughts(guest: &mut Guest, now: f64, config: &SimulationConfig) {
    let needs = &guest.needs;
    let mut kinds = Vec::with_capacity(4);

    if needs.hunger > config.need_high {
        kinds.push(ThoughtKind::Hungry);
    }
    if needs.thirst > config.need_high {
        kinds.push(ThoughtKind::Thirsty);
    }
    if needs.bathroom > config.need_high {
        kinds.push(ThoughtKind::NeedBathroom);
    }
    if needs.nausea > config.need_medium {
        kinds.push(ThoughtKind::Nauseous);
    }
    if needs.energy < config.need_low {
        kinds.push(ThoughtKind::Tired);
    }
    if guest.happiness > config.happy_threshold {
        kinds.push(ThoughtKind::Happy);
    }

    for kind in kinds {
        guest.think_deduped(Thought::new(kind, now), config.thought_dedup_window);
    }
}

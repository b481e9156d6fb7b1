//! Fishing minigame: the cast, bite, hook and reel sequence of one attempt.

use bracket_lib::prelude::RandomNumberGenerator;
use common::{Action, InputEvent};
use data::{FishSpecies, Location};
use serde::Deserialize;

/// Tunable constants of a fishing attempt.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EncounterTuning {
    /// Hook descent speed in depth units per second.
    pub cast_speed: f32,
    /// Hook ascent speed in depth units per second.
    pub reel_speed: f32,
    pub bite_wait_min: f32,
    pub bite_wait_max: f32,
    /// Chance that anything bites once the wait is over.
    pub bite_chance: f32,
    /// Seconds the player has before the hooked fish is judged.
    pub challenge_duration: f32,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            cast_speed: 150.0,
            reel_speed: 180.0,
            bite_wait_min: 2.0,
            bite_wait_max: 5.0,
            bite_chance: 1.0,
            challenge_duration: 3.0,
        }
    }
}

impl EncounterTuning {
    /// Returns these values if they can drive an encounter to completion,
    /// otherwise the defaults with a warning.
    pub fn validated(self) -> Self {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        let valid = positive(self.cast_speed)
            && positive(self.reel_speed)
            && non_negative(self.bite_wait_min)
            && non_negative(self.bite_wait_max)
            && self.bite_wait_min <= self.bite_wait_max
            && (0.0..=1.0).contains(&self.bite_chance)
            && non_negative(self.challenge_duration);
        if valid {
            self
        } else {
            log::warn!("Invalid encounter tuning {:?}, using defaults", self);
            Self::default()
        }
    }
}

/// A species on the line together with the challenge verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct HookedFish {
    pub species: FishSpecies,
    pub success: bool,
}

/// Phase of a [`FishingEncounter`].
#[derive(Clone, Debug, PartialEq)]
pub enum EncounterState {
    /// Waiting for the player to cast.
    Idle,
    /// Hook sinking towards the maximum depth.
    Casting,
    /// Hook at depth, timer running.
    WaitingForBite { elapsed: f32, wait: f32 },
    /// A fish bit; the skill challenge is running.
    HookedPendingChallenge { species: FishSpecies, elapsed: f32 },
    /// Line coming back up, possibly with a fish.
    Reeling { hooked: Option<HookedFish> },
}

/// Result of a finished attempt, reported once the hook is back at the surface.
#[derive(Clone, Debug, PartialEq)]
pub enum EncounterOutcome {
    Caught(FishSpecies),
    Escaped(FishSpecies),
    Empty,
}

/// State machine governing a single fishing attempt.
#[derive(Debug)]
pub struct FishingEncounter {
    state: EncounterState,
    depth: f32,
    max_depth: f32,
    tuning: EncounterTuning,
    confirm_held: bool,
}

impl FishingEncounter {
    /// Creates an idle encounter. Negative depths are treated as zero and
    /// unusable tuning is replaced by the defaults.
    pub fn new(max_depth: f32, tuning: EncounterTuning) -> Self {
        Self {
            state: EncounterState::Idle,
            depth: 0.0,
            max_depth: max_depth.max(0.0),
            tuning: tuning.validated(),
            confirm_held: false,
        }
    }

    /// Creates an encounter whose hook reaches the boat's line length,
    /// limited by the location's depth range.
    pub fn for_location(location: &Location, line_length: f32, tuning: EncounterTuning) -> Self {
        Self::new(location.depth_range.clamp(line_length), tuning)
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EncounterState::Idle)
    }

    /// Species currently on the line, if any.
    pub fn hooked_species(&self) -> Option<&FishSpecies> {
        match &self.state {
            EncounterState::HookedPendingChallenge { species, .. } => Some(species),
            EncounterState::Reeling {
                hooked: Some(hooked),
            } => Some(&hooked.species),
            _ => None,
        }
    }

    /// Seconds left in the skill challenge while it runs.
    pub fn challenge_remaining(&self) -> Option<f32> {
        match &self.state {
            EncounterState::HookedPendingChallenge { elapsed, .. } => {
                Some((self.tuning.challenge_duration - elapsed).max(0.0))
            }
            _ => None,
        }
    }

    pub fn phase_name(&self) -> &'static str {
        match self.state {
            EncounterState::Idle => "Idle",
            EncounterState::Casting => "Casting",
            EncounterState::WaitingForBite { .. } => "Waiting for a bite",
            EncounterState::HookedPendingChallenge { .. } => "Hooked!",
            EncounterState::Reeling { .. } => "Reeling",
        }
    }

    /// Applies a player input. Returns `true` when the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if event.action == Action::ConfirmChallenge {
            self.confirm_held = event.pressed;
            return matches!(self.state, EncounterState::HookedPendingChallenge { .. });
        }
        if !event.pressed {
            return false;
        }
        match (&self.state, event.action) {
            (EncounterState::Idle, Action::Cast) => {
                log::debug!("Casting line, max depth {}", self.max_depth);
                self.depth = 0.0;
                self.state = EncounterState::Casting;
                true
            }
            (
                EncounterState::Casting | EncounterState::WaitingForBite { .. },
                Action::Cast | Action::ReelOrCancel,
            ) => {
                log::debug!("Reeling in an empty line from depth {}", self.depth);
                self.state = EncounterState::Reeling { hooked: None };
                true
            }
            _ => false,
        }
    }

    /// Advances timers and the hook by `dt` seconds.
    ///
    /// Returns the outcome once the line is back at the surface; the encounter
    /// is then [`EncounterState::Idle`] again.
    pub fn advance(
        &mut self,
        dt: f32,
        location: &Location,
        rng: &mut RandomNumberGenerator,
    ) -> Option<EncounterOutcome> {
        let dt = dt.max(0.0);
        let mut surfaced = false;
        let next = match &mut self.state {
            EncounterState::Idle => None,
            EncounterState::Casting => {
                self.depth += self.tuning.cast_speed * dt;
                if self.depth >= self.max_depth {
                    self.depth = self.max_depth;
                    let wait = sample_wait(&self.tuning, rng);
                    log::debug!("Hook at depth {}, waiting {:.1}s", self.depth, wait);
                    Some(EncounterState::WaitingForBite { elapsed: 0.0, wait })
                } else {
                    None
                }
            }
            EncounterState::WaitingForBite { elapsed, wait } => {
                *elapsed += dt;
                if *elapsed >= *wait {
                    match roll_bite(&location.fish, self.tuning.bite_chance, rng) {
                        Some(species) => {
                            log::info!("{} ({}) is on the hook", species.name, species.rarity.label());
                            Some(EncounterState::HookedPendingChallenge {
                                species: species.clone(),
                                elapsed: 0.0,
                            })
                        }
                        None => {
                            log::debug!("Nothing bit at {}", location.id);
                            Some(EncounterState::Reeling { hooked: None })
                        }
                    }
                } else {
                    None
                }
            }
            EncounterState::HookedPendingChallenge { species, elapsed } => {
                *elapsed += dt;
                if *elapsed >= self.tuning.challenge_duration {
                    let success = self.confirm_held;
                    Some(EncounterState::Reeling {
                        hooked: Some(HookedFish {
                            species: species.clone(),
                            success,
                        }),
                    })
                } else {
                    None
                }
            }
            EncounterState::Reeling { .. } => {
                self.depth = (self.depth - self.tuning.reel_speed * dt).max(0.0);
                surfaced = self.depth <= 0.0;
                None
            }
        };
        if let Some(next) = next {
            self.state = next;
        }
        if !surfaced {
            return None;
        }
        let outcome = match std::mem::replace(&mut self.state, EncounterState::Idle) {
            EncounterState::Reeling {
                hooked: Some(hooked),
            } if hooked.success => EncounterOutcome::Caught(hooked.species),
            EncounterState::Reeling {
                hooked: Some(hooked),
            } => EncounterOutcome::Escaped(hooked.species),
            _ => EncounterOutcome::Empty,
        };
        Some(outcome)
    }
}

fn sample_wait(tuning: &EncounterTuning, rng: &mut RandomNumberGenerator) -> f32 {
    let wait = if tuning.bite_wait_max > tuning.bite_wait_min {
        rng.range(tuning.bite_wait_min, tuning.bite_wait_max)
    } else {
        tuning.bite_wait_min
    };
    wait.max(0.0)
}

fn roll_bite<'a>(
    table: &'a [FishSpecies],
    bite_chance: f32,
    rng: &mut RandomNumberGenerator,
) -> Option<&'a FishSpecies> {
    if bite_chance < 1.0 && rng.range(0.0_f32, 1.0) >= bite_chance {
        return None;
    }
    draw_species(table, rng)
}

/// Draws one species from `table`, weighted by rarity.
///
/// An empty table yields `None`; a table whose weights sum to zero is
/// sampled uniformly.
pub fn draw_species<'a>(
    table: &'a [FishSpecies],
    rng: &mut RandomNumberGenerator,
) -> Option<&'a FishSpecies> {
    if table.is_empty() {
        return None;
    }
    let total: u32 = table.iter().map(|f| f.rarity.spawn_weight()).sum();
    if total == 0 {
        let idx = rng.range(0, table.len() as i32) as usize;
        return table.get(idx);
    }
    let mut roll = rng.range(0, total as i32) as u32;
    for species in table {
        let weight = species.rarity.spawn_weight();
        if roll < weight {
            return Some(species);
        }
        roll -= weight;
    }
    table.last()
}

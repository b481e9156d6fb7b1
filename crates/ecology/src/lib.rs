//! Ambient fish swimming around the fishing scene.
use bracket_lib::prelude::RandomNumberGenerator;
use common::{Rect, Vec2};
use data::{FishSpecies, Rarity};

/// A visible fish that is not on the line.
#[derive(Clone, Debug)]
pub struct AmbientFish {
    pub name: String,
    pub rarity: Rarity,
    pub position: Vec2,
    /// Horizontal speed in pixels per second.
    pub speed: f32,
    /// `1.0` swimming right, `-1.0` swimming left.
    pub direction: f32,
    wobble_amount: f32,
    wobble_speed: f32,
    base_y: f32,
    time: f32,
}

impl AmbientFish {
    pub fn new(species: &FishSpecies, position: Vec2, speed: f32, direction: f32) -> Self {
        Self {
            name: species.name.clone(),
            rarity: species.rarity,
            position,
            speed,
            direction,
            wobble_amount: 0.0,
            wobble_speed: 0.0,
            base_y: position.y,
            time: 0.0,
        }
    }
}

/// Spawns `count` ambient fish from `species` inside `water`.
///
/// Returns an empty pool when there is nothing to spawn.
pub fn spawn_ambient_fish(
    species: &[FishSpecies],
    water: Rect,
    count: usize,
    rng: &mut RandomNumberGenerator,
) -> Vec<AmbientFish> {
    if species.is_empty() || water.w <= 0.0 || water.h <= 0.0 {
        return Vec::new();
    }
    let mut pool = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.range(0, species.len() as i32) as usize;
        let pos = Vec2::new(
            rng.range(water.x, water.right()),
            rng.range(water.y, water.bottom()),
        );
        let direction = if rng.range(0, 2) == 0 { -1.0 } else { 1.0 };
        let mut fish = AmbientFish::new(&species[idx], pos, rng.range(20.0, 80.0), direction);
        fish.wobble_amount = rng.range(0.5, 2.0);
        fish.wobble_speed = rng.range(0.5, 1.5);
        pool.push(fish);
    }
    log::debug!("Spawned {} ambient fish", pool.len());
    pool
}

/// Swims every fish horizontally, turning around at the edges of `water`.
pub fn update_ambient_fish(fishes: &mut [AmbientFish], water: Rect, dt: f32) {
    for fish in fishes {
        fish.time += dt;
        fish.position.x += fish.speed * fish.direction * dt;
        if fish.position.x <= water.x {
            fish.position.x = water.x;
            fish.direction = 1.0;
        } else if fish.position.x >= water.right() {
            fish.position.x = water.right();
            fish.direction = -1.0;
        }
        let wobble = (fish.time * fish.wobble_speed * std::f32::consts::TAU).sin() * fish.wobble_amount;
        fish.position.y = (fish.base_y + wobble).clamp(water.y, water.bottom());
    }
}

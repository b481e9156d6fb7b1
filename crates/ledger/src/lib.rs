//! Player economy: coins, caught fish, boat upgrades and unlocked locations.

use std::collections::BTreeMap;

use common::{GameError, GameResult, Vec2};
use data::{FishSpecies, Location, LocationId, Rarity};
use serde::{Deserialize, Serialize};

mod save;

pub use save::{JsonSaveFile, MemoryStore, SaveState, SaveStore};

/// Coins a brand new save starts with.
pub const STARTING_COINS: u32 = 100;

const SPEED_TABLE: [u32; 5] = [200, 250, 300, 400, 500];
const CAPACITY_TABLE: [u32; 5] = [10, 15, 20, 30, 50];
const LINE_LENGTH_TABLE: [u32; 5] = [450, 500, 700, 850, 1000];

/// Purchasable boat upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    Speed,
    Capacity,
    LineLength,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Speed, UpgradeKind::Capacity, UpgradeKind::LineLength];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::Speed => "Speed",
            UpgradeKind::Capacity => "Capacity",
            UpgradeKind::LineLength => "Line Length",
        }
    }

    /// Stat value for every level of this upgrade.
    pub fn table(self) -> &'static [u32] {
        match self {
            UpgradeKind::Speed => &SPEED_TABLE,
            UpgradeKind::Capacity => &CAPACITY_TABLE,
            UpgradeKind::LineLength => &LINE_LENGTH_TABLE,
        }
    }

    pub fn max_level(self) -> usize {
        self.table().len() - 1
    }
}

/// Upgrade level per kind, as stored in the save file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub speed: usize,
    pub capacity: usize,
    pub line_length: usize,
}

impl UpgradeLevels {
    pub fn get(&self, kind: UpgradeKind) -> usize {
        match kind {
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Capacity => self.capacity,
            UpgradeKind::LineLength => self.line_length,
        }
    }

    fn get_mut(&mut self, kind: UpgradeKind) -> &mut usize {
        match kind {
            UpgradeKind::Speed => &mut self.speed,
            UpgradeKind::Capacity => &mut self.capacity,
            UpgradeKind::LineLength => &mut self.line_length,
        }
    }
}

/// Derived boat statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoatStats {
    /// Sea map travel speed in pixels per second.
    pub speed: f32,
    /// Fish the boat is meant to hold.
    pub capacity: usize,
    /// Deepest point the hook can reach.
    pub line_length: f32,
}

/// The player's boat. Stats always match the current levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Boat {
    levels: UpgradeLevels,
    stats: BoatStats,
}

impl Default for Boat {
    fn default() -> Self {
        Self::with_levels(UpgradeLevels::default())
    }
}

impl Boat {
    /// Builds a boat from saved levels, clamping each into its table.
    pub fn with_levels(levels: UpgradeLevels) -> Self {
        let mut clamped = levels;
        for kind in UpgradeKind::ALL {
            let level = clamped.get_mut(kind);
            if *level > kind.max_level() {
                log::warn!("{} level {} out of range, clamping", kind.label(), level);
                *level = kind.max_level();
            }
        }
        Self {
            levels: clamped,
            stats: stats_for(&clamped),
        }
    }

    pub fn levels(&self) -> UpgradeLevels {
        self.levels
    }

    pub fn level(&self, kind: UpgradeKind) -> usize {
        self.levels.get(kind)
    }

    pub fn stats(&self) -> BoatStats {
        self.stats
    }

    /// Price of the next level, `None` when already maxed.
    pub fn upgrade_cost(&self, kind: UpgradeKind) -> Option<u32> {
        let level = self.level(kind);
        (level < kind.max_level()).then(|| (level as u32 + 1) * 100)
    }

    fn raise(&mut self, kind: UpgradeKind) {
        let level = self.levels.get_mut(kind);
        *level = (*level + 1).min(kind.max_level());
        self.stats = stats_for(&self.levels);
    }
}

fn stats_for(levels: &UpgradeLevels) -> BoatStats {
    let pick = |kind: UpgradeKind| kind.table()[levels.get(kind)];
    BoatStats {
        speed: pick(UpgradeKind::Speed) as f32,
        capacity: pick(UpgradeKind::Capacity) as usize,
        line_length: pick(UpgradeKind::LineLength) as f32,
    }
}

/// A fish the player has landed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaughtFish {
    pub species_id: String,
    pub name: String,
    pub rarity: Rarity,
    pub value: u32,
    pub location: LocationId,
}

impl CaughtFish {
    pub fn new(species: &FishSpecies, location: &LocationId) -> Self {
        Self {
            species_id: species.id.clone(),
            name: species.name.clone(),
            rarity: species.rarity,
            value: species.base_value,
            location: location.clone(),
        }
    }
}

/// Fish currently carried on the boat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    fish: Vec<CaughtFish>,
}

impl Inventory {
    pub fn fish(&self) -> &[CaughtFish] {
        &self.fish
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn total_value(&self) -> u32 {
        self.fish.iter().fold(0u32, |acc, f| acc.saturating_add(f.value))
    }

}

/// All persistent player state.
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    wallet: u32,
    inventory: Inventory,
    boat: Boat,
    unlocked: BTreeMap<LocationId, bool>,
}

impl Default for Ledger {
    fn default() -> Self {
        let mut unlocked = BTreeMap::new();
        unlocked.insert(LocationId::coast(), true);
        Self {
            wallet: STARTING_COINS,
            inventory: Inventory::default(),
            boat: Boat::default(),
            unlocked,
        }
    }
}

impl Ledger {
    pub fn wallet(&self) -> u32 {
        self.wallet
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn boat(&self) -> &Boat {
        &self.boat
    }

    pub fn is_unlocked(&self, id: &LocationId) -> bool {
        id.is_coast() || self.unlocked.get(id).copied().unwrap_or(false)
    }

    fn charge(&mut self, cost: u32) -> GameResult<()> {
        if self.wallet < cost {
            return Err(GameError::InsufficientFunds {
                cost,
                balance: self.wallet,
            });
        }
        self.wallet -= cost;
        Ok(())
    }

    /// Buys the next level of `kind` and returns the price paid.
    pub fn purchase_upgrade(&mut self, kind: UpgradeKind) -> GameResult<u32> {
        let cost = self.boat.upgrade_cost(kind).ok_or(GameError::MaxLevel)?;
        self.charge(cost)?;
        self.boat.raise(kind);
        log::info!(
            "Upgraded {} to level {} for {} coins",
            kind.label(),
            self.boat.level(kind),
            cost
        );
        Ok(cost)
    }

    /// Pays to open `location` for fishing and returns the price paid.
    pub fn unlock_location(&mut self, location: &Location) -> GameResult<u32> {
        if self.is_unlocked(&location.id) {
            return Err(GameError::AlreadyUnlocked(location.id.to_string()));
        }
        let cost = location.unlock_cost;
        self.charge(cost)?;
        self.unlocked.insert(location.id.clone(), true);
        log::info!("Unlocked {} for {} coins", location.id, cost);
        Ok(cost)
    }

    /// Sells every carried fish, returning the coins earned.
    pub fn sell_all(&mut self) -> u32 {
        if self.inventory.is_empty() {
            return 0;
        }
        let total = self.inventory.total_value();
        let count = self.inventory.len();
        self.inventory.fish.clear();
        self.wallet = self.wallet.saturating_add(total);
        log::info!("Sold {} fish for {} coins", count, total);
        total
    }

    /// Adds a landed fish to the inventory and credits its value.
    pub fn record_catch(&mut self, species: &FishSpecies, location: &LocationId) -> u32 {
        let fish = CaughtFish::new(species, location);
        let value = fish.value;
        self.inventory.fish.push(fish);
        self.wallet = self.wallet.saturating_add(value);
        let capacity = self.boat.stats().capacity;
        if self.inventory.len() > capacity {
            log::warn!(
                "Carrying {} fish, boat capacity is {}",
                self.inventory.len(),
                capacity
            );
        }
        value
    }

    /// Starts over while keeping the coins earned so far.
    pub fn reset_for_new_adventure(&mut self) {
        let wallet = self.wallet;
        *self = Self {
            wallet,
            ..Self::default()
        };
    }

    /// Captures the ledger together with the mode and map position to persist.
    pub fn snapshot(&self, mode: &str, map_position: Vec2) -> SaveState {
        let mut unlocked = SaveState::default().unlocked_locations;
        for (id, open) in &self.unlocked {
            unlocked.insert(id.clone(), *open);
        }
        SaveState {
            coins: self.wallet,
            boat_upgrades: self.boat.levels(),
            unlocked_locations: unlocked,
            collected_fish: self.inventory.fish.clone(),
            current_game_state: mode.to_string(),
            player_map_position: map_position,
        }
    }

    /// Rebuilds a ledger from saved state.
    pub fn from_save(state: &SaveState) -> Self {
        let mut unlocked = state.unlocked_locations.clone();
        unlocked.insert(LocationId::coast(), true);
        Self {
            wallet: state.coins,
            inventory: Inventory {
                fish: state.collected_fish.clone(),
            },
            boat: Boat::with_levels(state.boat_upgrades),
            unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::{load_catalog_embedded, Catalog};

    fn catalog() -> Catalog {
        load_catalog_embedded().expect("catalog")
    }

    fn ledger_with(coins: u32) -> Ledger {
        let mut ledger = Ledger::default();
        ledger.wallet = coins;
        ledger
    }

    #[test]
    fn fresh_ledger_defaults() {
        let ledger = Ledger::default();
        assert_eq!(ledger.wallet(), 100);
        assert!(ledger.inventory().is_empty());
        assert!(ledger.is_unlocked(&LocationId::coast()));
        assert!(!ledger.is_unlocked(&LocationId::from("Sea")));
        let stats = ledger.boat().stats();
        assert_eq!(stats.speed, 200.0);
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.line_length, 450.0);
    }

    #[test]
    fn unlock_rejected_when_short() {
        let catalog = catalog();
        let sea = catalog.get(&LocationId::from("Sea")).expect("sea");
        let mut ledger = ledger_with(100);
        let res = ledger.unlock_location(sea);
        assert!(matches!(
            res,
            Err(GameError::InsufficientFunds { cost: 800, balance: 100 })
        ));
        assert_eq!(ledger.wallet(), 100);
        assert!(!ledger.is_unlocked(&sea.id));
    }

    #[test]
    fn unlock_accepted_with_exact_funds() {
        let catalog = catalog();
        let sea = catalog.get(&LocationId::from("Sea")).expect("sea");
        let mut ledger = ledger_with(800);
        assert_eq!(ledger.unlock_location(sea).expect("unlock"), 800);
        assert_eq!(ledger.wallet(), 0);
        assert!(ledger.is_unlocked(&sea.id));
        assert!(matches!(
            ledger.unlock_location(sea),
            Err(GameError::AlreadyUnlocked(_))
        ));
    }

    #[test]
    fn coast_cannot_be_bought() {
        let catalog = catalog();
        let coast = catalog.get(&LocationId::coast()).expect("coast");
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.unlock_location(coast),
            Err(GameError::AlreadyUnlocked(_))
        ));
    }

    #[test]
    fn upgrades_stop_at_table_end() {
        let mut ledger = ledger_with(10_000);
        let mut paid = Vec::new();
        for _ in 0..10 {
            match ledger.purchase_upgrade(UpgradeKind::Speed) {
                Ok(cost) => paid.push(cost),
                Err(e) => {
                    assert!(matches!(e, GameError::MaxLevel));
                    break;
                }
            }
        }
        assert_eq!(paid, vec![100, 200, 300, 400]);
        assert_eq!(ledger.boat().level(UpgradeKind::Speed), 4);
        assert_eq!(ledger.boat().stats().speed, 500.0);
        assert_eq!(ledger.wallet(), 10_000 - 1000);
        assert_eq!(ledger.boat().upgrade_cost(UpgradeKind::Speed), None);
    }

    #[test]
    fn upgrade_rejected_without_funds() {
        let mut ledger = ledger_with(99);
        let res = ledger.purchase_upgrade(UpgradeKind::LineLength);
        assert!(matches!(res, Err(GameError::InsufficientFunds { cost: 100, .. })));
        assert_eq!(ledger.wallet(), 99);
        assert_eq!(ledger.boat().level(UpgradeKind::LineLength), 0);
    }

    #[test]
    fn line_length_upgrade_updates_stats() {
        let mut ledger = ledger_with(100);
        ledger.purchase_upgrade(UpgradeKind::LineLength).expect("upgrade");
        assert_eq!(ledger.boat().stats().line_length, 500.0);
        assert_eq!(ledger.wallet(), 0);
    }

    #[test]
    fn sell_all_on_empty_is_noop() {
        let mut ledger = Ledger::default();
        let before = ledger.clone();
        assert_eq!(ledger.sell_all(), 0);
        assert_eq!(ledger.sell_all(), 0);
        assert_eq!(ledger, before);
    }

    #[test]
    fn catch_then_sell() {
        let catalog = catalog();
        let tuna = catalog.species("tuna").expect("tuna").clone();
        let sea = LocationId::from("Sea");
        let mut ledger = ledger_with(0);
        assert_eq!(ledger.record_catch(&tuna, &sea), 100);
        ledger.record_catch(&tuna, &sea);
        assert_eq!(ledger.wallet(), 200);
        assert_eq!(ledger.inventory().len(), 2);
        assert!(ledger.inventory().fish().iter().all(|f| f.name == "Tuna"));
        assert_eq!(ledger.inventory().fish()[0].location, sea);
        assert_eq!(ledger.sell_all(), 200);
        assert_eq!(ledger.wallet(), 400);
        assert!(ledger.inventory().is_empty());
    }

    #[test]
    fn catches_beyond_capacity_are_kept() {
        let catalog = catalog();
        let bass = catalog.species("sea_bass").expect("bass").clone();
        let mut ledger = Ledger::default();
        for _ in 0..12 {
            ledger.record_catch(&bass, &LocationId::coast());
        }
        assert_eq!(ledger.inventory().len(), 12);
    }

    #[test]
    fn new_adventure_keeps_coins_only() {
        let catalog = catalog();
        let sea = catalog.get(&LocationId::from("Sea")).expect("sea");
        let mut ledger = ledger_with(2000);
        ledger.unlock_location(sea).expect("unlock");
        ledger.purchase_upgrade(UpgradeKind::Capacity).expect("upgrade");
        ledger.record_catch(&sea.fish[0], &sea.id);
        let coins = ledger.wallet();
        ledger.reset_for_new_adventure();
        assert_eq!(ledger.wallet(), coins);
        assert!(ledger.inventory().is_empty());
        assert!(!ledger.is_unlocked(&sea.id));
        assert_eq!(ledger.boat().levels(), UpgradeLevels::default());
    }

    #[test]
    fn snapshot_restores_equal_ledger() {
        let catalog = catalog();
        let sea = catalog.get(&LocationId::from("Sea")).expect("sea");
        let mut ledger = ledger_with(1500);
        ledger.unlock_location(sea).expect("unlock");
        ledger.record_catch(&sea.fish[1], &sea.id);
        let state = ledger.snapshot("map_explore", Vec2::new(10.0, 20.0));
        assert_eq!(state.current_game_state, "map_explore");
        assert_eq!(state.unlocked_locations.get(&LocationId::from("Ocean")), Some(&false));
        let restored = Ledger::from_save(&state);
        assert_eq!(restored.wallet(), ledger.wallet());
        assert_eq!(restored.inventory(), ledger.inventory());
        assert!(restored.is_unlocked(&sea.id));
    }

    #[test]
    fn saved_levels_are_clamped() {
        let state = SaveState {
            boat_upgrades: UpgradeLevels {
                speed: 9,
                capacity: 1,
                line_length: 0,
            },
            ..SaveState::default()
        };
        let ledger = Ledger::from_save(&state);
        assert_eq!(ledger.boat().level(UpgradeKind::Speed), 4);
        assert_eq!(ledger.boat().stats().speed, 500.0);
        assert_eq!(ledger.boat().stats().capacity, 15);
    }
}

//! Data loading utilities for Fishmania.

use std::fmt;

use common::{GameError, GameResult, Vec2};
use serde::{Deserialize, Serialize};

/// Rarity tier of a fish species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
    /// Any tier the catalog names that the game does not know about.
    #[serde(other)]
    Other,
}

impl Rarity {
    /// Relative spawn weight used when drawing a species from a location.
    pub fn spawn_weight(self) -> u32 {
        match self {
            Rarity::Common => 70,
            Rarity::Rare => 25,
            Rarity::Legendary => 5,
            Rarity::Other => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
            Rarity::Other => "unknown",
        }
    }
}

/// Fish species parameters loaded from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FishSpecies {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub base_value: u32,
    #[serde(default)]
    pub sprite: String,
}

/// Identifier of a fishing location, e.g. `Coast`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// The starting location. Always unlocked and free.
    pub const COAST: &'static str = "Coast";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn coast() -> Self {
        Self::new(Self::COAST)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_coast(&self) -> bool {
        self.0 == Self::COAST
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Depth interval reachable by the hook at a location.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    /// Clamps a line length into this range, never returning a negative depth.
    ///
    /// A range with `min > max` is treated as ending at `max`.
    pub fn clamp(&self, line_length: f32) -> f32 {
        let lo = self.min.min(self.max);
        line_length.clamp(lo, self.max).max(0.0)
    }
}

/// Static fishing location definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub display_name: String,
    #[serde(default)]
    pub fish: Vec<FishSpecies>,
    #[serde(default)]
    pub unlock_cost: u32,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub music: Option<String>,
    pub depth_range: DepthRange,
    /// Spot position on the sea map as fractions of the map size.
    pub map_spot: Vec2,
}

/// Read-only table of every location.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Looks up a species by id across all locations.
    pub fn species(&self, id: &str) -> Option<&FishSpecies> {
        self.locations
            .iter()
            .flat_map(|l| l.fish.iter())
            .find(|f| f.id == id)
    }
}

/// Loads a [`Catalog`] from the given JSON file path.
pub fn load_catalog(path: &str) -> GameResult<Catalog> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GameError::AssetNotFound(path.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    parse_catalog_json(&data)
}

/// Loads the [`Catalog`] embedded at compile time.
pub fn load_catalog_embedded() -> GameResult<Catalog> {
    parse_catalog_json(include_str!("../../../assets/locations.json"))
}

/// Loads the catalog from `path` when given, falling back to the embedded table.
pub fn load_catalog_or_embedded(path: Option<&str>) -> GameResult<Catalog> {
    if let Some(path) = path {
        match load_catalog(path) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => log::warn!("Catalog {} unusable ({}), using built-in locations", path, e),
        }
    }
    load_catalog_embedded()
}

fn parse_catalog_json(data: &str) -> GameResult<Catalog> {
    let locations: Vec<Location> =
        serde_json::from_str(data).map_err(|e| GameError::Decode(e.to_string()))?;
    if locations.is_empty() {
        return Err(GameError::InvalidOperation);
    }
    log::debug!("Loaded {} locations", locations.len());
    Ok(Catalog::new(locations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/locations.json");
        let catalog = load_catalog(path).expect("catalog");
        assert_eq!(catalog.locations().len(), 3);
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = load_catalog_embedded().expect("catalog");
        let coast = catalog.get(&LocationId::coast()).expect("coast");
        assert_eq!(coast.unlock_cost, 0);
        let sea = catalog.get(&LocationId::from("Sea")).expect("sea");
        assert_eq!(sea.unlock_cost, 800);
        assert_eq!(sea.fish.len(), 3);
    }

    #[test]
    fn parse_failure_when_empty() {
        let res = parse_catalog_json("[]");
        assert!(matches!(res, Err(GameError::InvalidOperation)));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let res = parse_catalog_json("{ not json");
        assert!(matches!(res, Err(GameError::Decode(_))));
    }

    #[test]
    fn missing_file_is_asset_not_found() {
        let res = load_catalog("/no/such/locations.json");
        assert!(matches!(res, Err(GameError::AssetNotFound(_))));
    }

    #[test]
    fn missing_path_falls_back_to_embedded() {
        let catalog = load_catalog_or_embedded(Some("/no/such/locations.json")).expect("catalog");
        assert!(catalog.get(&LocationId::coast()).is_some());
    }

    #[test]
    fn parse_simple_data() {
        let json = r#"[{
            "id": "Pond",
            "display_name": "Pond",
            "depth_range": { "min": 0.0, "max": 10.0 },
            "map_spot": { "x": 0.5, "y": 0.5 },
            "fish": [{ "id": "koi", "name": "Koi", "rarity": "mythic", "base_value": 5 }]
        }]"#;
        let catalog = parse_catalog_json(json).expect("catalog");
        let pond = catalog.get(&LocationId::from("Pond")).expect("pond");
        assert_eq!(pond.unlock_cost, 0);
        assert_eq!(pond.music, None);
        assert_eq!(pond.fish[0].rarity, Rarity::Other);
        assert_eq!(pond.fish[0].rarity.spawn_weight(), 10);
    }

    #[test]
    fn species_lookup_spans_locations() {
        let catalog = load_catalog_embedded().expect("catalog");
        assert_eq!(catalog.species("whale").map(|s| s.base_value), Some(1000));
        assert!(catalog.species("nope").is_none());
    }

    #[test]
    fn depth_range_clamps_line_length() {
        let range = DepthRange { min: 50.0, max: 150.0 };
        assert_eq!(range.clamp(450.0), 150.0);
        assert_eq!(range.clamp(10.0), 50.0);
        let broken = DepthRange { min: 0.0, max: -5.0 };
        assert_eq!(broken.clamp(450.0), 0.0);
    }
}

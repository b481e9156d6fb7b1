//! Explorable places: the home island and the sea map.
use common::{Rect, Vec2};
use data::{Location, LocationId};

/// Logical screen size every scene is laid out in.
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

const LAND_PLAYER_SPEED: f32 = 180.0;
const LAND_PLAYER_SIZE: (f32, f32) = (32.0, 48.0);
const MAP_BOAT_SIZE: (f32, f32) = (25.0, 25.0);
const SPOT_SIZE: (f32, f32) = (200.0, 80.0);
const FISHING_BOAT_WIDTH: f32 = 120.0;

/// Unit direction from held movement keys. Opposite keys cancel out.
pub fn direction(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    Vec2::new(axis(left, right), axis(up, down))
}

/// Interactive object on the island.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hotspot {
    /// Goes back to the main menu.
    House,
    /// Sets sail to the sea map.
    Boat,
}

impl Hotspot {
    pub fn prompt(self) -> &'static str {
        match self {
            Hotspot::House => "Enter the house",
            Hotspot::Boat => "Go fishing",
        }
    }
}

/// Walkable island scene.
#[derive(Clone, Debug)]
pub struct LandScene {
    bounds: Rect,
    hotspots: Vec<(Hotspot, Rect)>,
    player: Rect,
    active: Option<Hotspot>,
}

impl Default for LandScene {
    fn default() -> Self {
        Self::new()
    }
}

impl LandScene {
    /// Builds the island with the player in the middle of the walkable area.
    pub fn new() -> Self {
        let bounds = Rect::new(
            SCREEN_WIDTH * 0.19,
            SCREEN_HEIGHT * 0.10,
            SCREEN_WIDTH * 0.65,
            SCREEN_HEIGHT * 0.76,
        );
        let hotspots = vec![
            (
                Hotspot::House,
                Rect::centered(Vec2::new(SCREEN_WIDTH * 0.50, SCREEN_HEIGHT * 0.48), 170.0, 140.0),
            ),
            (
                Hotspot::Boat,
                Rect::centered(Vec2::new(SCREEN_WIDTH * 0.60, SCREEN_HEIGHT * 0.83), 130.0, 90.0),
            ),
        ];
        let mut scene = Self {
            bounds,
            hotspots,
            player: Rect::centered(bounds.center(), LAND_PLAYER_SIZE.0, LAND_PLAYER_SIZE.1),
            active: None,
        };
        scene.refresh_active();
        scene
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn player(&self) -> Rect {
        self.player
    }

    pub fn hotspots(&self) -> &[(Hotspot, Rect)] {
        &self.hotspots
    }

    /// Hotspot the player currently stands on.
    pub fn active(&self) -> Option<Hotspot> {
        self.active
    }

    /// Walks the player along `dir` for `dt` seconds.
    pub fn update(&mut self, dir: Vec2, dt: f32) {
        self.player.x += dir.x * LAND_PLAYER_SPEED * dt;
        self.player.y += dir.y * LAND_PLAYER_SPEED * dt;
        self.player.clamp_inside(&self.bounds);
        self.refresh_active();
    }

    fn refresh_active(&mut self) {
        self.active = self
            .hotspots
            .iter()
            .find(|(_, area)| area.intersects(&self.player))
            .map(|(spot, _)| *spot);
    }
}

/// A fishing spot marked on the sea map.
#[derive(Clone, Debug, PartialEq)]
pub struct FishingSpot {
    pub location: LocationId,
    pub label: String,
    pub area: Rect,
}

/// Static sea chart with one spot per location.
#[derive(Clone, Debug)]
pub struct SeaMap {
    spots: Vec<FishingSpot>,
    limits: Rect,
}

impl SeaMap {
    pub fn new(locations: &[Location]) -> Self {
        let spots = locations
            .iter()
            .map(|loc| FishingSpot {
                location: loc.id.clone(),
                label: loc.display_name.clone(),
                area: Rect::centered(
                    Vec2::new(loc.map_spot.x * SCREEN_WIDTH, loc.map_spot.y * SCREEN_HEIGHT),
                    SPOT_SIZE.0,
                    SPOT_SIZE.1,
                ),
            })
            .collect();
        Self {
            spots,
            limits: Rect::new(
                SCREEN_WIDTH * 0.01,
                SCREEN_HEIGHT * 0.01,
                SCREEN_WIDTH * 0.94,
                SCREEN_HEIGHT * 0.94,
            ),
        }
    }

    pub fn spots(&self) -> &[FishingSpot] {
        &self.spots
    }

    pub fn limits(&self) -> Rect {
        self.limits
    }

    /// Rectangle the boat occupies when centred on `pos`.
    pub fn boat_rect(pos: Vec2) -> Rect {
        Rect::centered(pos, MAP_BOAT_SIZE.0, MAP_BOAT_SIZE.1)
    }

    /// Keeps a boat centred on `pos` inside the navigable sea.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let mut rect = Self::boat_rect(pos);
        rect.clamp_inside(&self.limits);
        rect.center()
    }

    /// Sails from `pos` along `dir` for `dt` seconds at `speed`.
    pub fn sail(&self, pos: Vec2, dir: Vec2, speed: f32, dt: f32) -> Vec2 {
        self.clamp(Vec2::new(pos.x + dir.x * speed * dt, pos.y + dir.y * speed * dt))
    }

    /// Spot overlapped by a boat at `pos`, first match wins.
    pub fn spot_at(&self, pos: Vec2) -> Option<&FishingSpot> {
        let boat = Self::boat_rect(pos);
        self.spots.iter().find(|s| s.area.intersects(&boat))
    }
}

/// Layout of the fishing scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FishingScene {
    /// Area ambient fish swim in.
    pub water: Rect,
    /// Horizontal range the boat may move in.
    pub dock: Rect,
}

impl Default for FishingScene {
    fn default() -> Self {
        Self {
            water: Rect::new(0.0, SCREEN_HEIGHT * 0.45, SCREEN_WIDTH, SCREEN_HEIGHT * 0.5),
            dock: Rect::new(0.0, SCREEN_HEIGHT - 130.0, SCREEN_WIDTH, 60.0),
        }
    }
}

impl FishingScene {
    /// Fixed boat position used whenever fishing starts.
    pub fn anchor(&self) -> f32 {
        self.dock.center().x
    }

    /// Moves the boat horizontally, keeping its hull inside the dock area.
    pub fn move_boat(&self, x: f32, dir: f32, speed: f32, dt: f32) -> f32 {
        let half = FISHING_BOAT_WIDTH / 2.0;
        (x + dir * speed * dt).clamp(self.dock.x + half, self.dock.right() - half)
    }
}

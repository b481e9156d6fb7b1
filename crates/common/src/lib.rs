//! Common types shared across Fishmania crates.

use serde::{Deserialize, Serialize};

/// Position or velocity in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Creates a new [`Vec2`].
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Boat position on the sea map for a fresh save, next to the coast spot.
pub const MAP_START: Vec2 = Vec2 { x: 768.0, y: 468.0 };

/// Axis aligned rectangle used for hotspots and collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of the given size centred on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns `true` when the two rectangles overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Moves this rectangle so it lies inside `bounds`.
    ///
    /// A rectangle larger than `bounds` is aligned to its top left corner.
    pub fn clamp_inside(&mut self, bounds: &Rect) {
        if self.right() > bounds.right() {
            self.x = bounds.right() - self.w;
        }
        if self.bottom() > bounds.bottom() {
            self.y = bounds.bottom() - self.h;
        }
        if self.x < bounds.x {
            self.x = bounds.x;
        }
        if self.y < bounds.y {
            self.y = bounds.y;
        }
    }
}

/// Logical input action, independent of the physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Cast,
    ReelOrCancel,
    ConfirmChallenge,
    MenuUp,
    MenuDown,
    Select,
    EscapeBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
}

/// A key going down or up, already mapped to an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

impl InputEvent {
    pub fn pressed(action: Action) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn released(action: Action) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid operation")]
    InvalidOperation,
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    #[error("location `{0}` is locked")]
    LocationLocked(String),
    #[error("location `{0}` is already unlocked")]
    AlreadyUnlocked(String),
    #[error("not enough coins: need {cost}, have {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },
    #[error("upgrade already at max level")]
    MaxLevel,
}

pub type GameResult<T> = Result<T, GameError>;

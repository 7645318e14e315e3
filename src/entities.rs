//! All game entity types — pure data, no logic.

use crate::arena::Arena;
use crate::config::Rules;
use crate::geometry::{Rect, Size};

/// Which role view an arena entity belongs to.  The player is kept apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Bullet,
    Enemy,
    EnemyBullet,
    PowerUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub role: Role,
    pub rect: Rect,
    /// World units per frame; negative is upward.
    pub vy: i32,
    /// Only enemies read this: when they last fired.
    pub last_shot_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    ShopOpen,
    GameOver,
}

/// Sound requests raised while computing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Explosion,
}

/// Keys currently held down, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub health: i32,
    pub speed: i32,
    pub last_shot_ms: u64,
}

/// Bounding-box sizes, taken from the loaded sprite images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSizes {
    pub player: Size,
    pub bullet: Size,
    pub enemy: Size,
    pub enemy_bullet: Size,
    pub power_up: Size,
}

impl SpriteSizes {
    pub fn of(&self, role: Role) -> Size {
        match role {
            Role::Bullet => self.bullet,
            Role::Enemy => self.enemy,
            Role::EnemyBullet => self.enemy_bullet,
            Role::PowerUp => self.power_up,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Every sprite except the player, tagged by role.
    pub arena: Arena,
    pub currency: u32,
    pub last_power_up_ms: u64,
    pub status: GameStatus,
    pub frame: u64,
    pub sizes: SpriteSizes,
    pub rules: Rules,
    /// Cues raised by the most recent frame.
    pub sounds: Vec<SoundCue>,
}

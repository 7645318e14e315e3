//! Tuning constants and the rule switches that settle how collisions are
//! tallied.

use crate::geometry::Rect;

// ── Playfield ────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

/// World units covered by one terminal cell.
pub const CELL_WIDTH: i32 = 10;
pub const CELL_HEIGHT: i32 = 20;

pub const FPS: u32 = 60;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START: (i32, i32) = (400, 550);
pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_HEALTH: i32 = 3;

pub const BULLET_SPEED: i32 = 10;
/// Minimum milliseconds between two player shots.
pub const BULLET_COOLDOWN_MS: u64 = 500;

// ── Enemies & pickups ────────────────────────────────────────────────────────

pub const ENEMY_SPEED: i32 = 1;
pub const ENEMY_BULLET_SPEED: i32 = 5;
pub const ENEMY_SHOOT_DELAY_MS: u64 = 2000;
pub const WAVE_SIZE: usize = 5;

pub const POWER_UP_SPEED: i32 = ENEMY_SPEED;
pub const POWER_UP_COOLDOWN_MS: u64 = 30_000;

/// Spawned sprites are centred on a random x in this band, just above the top edge.
pub const SPAWN_MARGIN: i32 = 20;
pub const SPAWN_Y: i32 = -20;

// ── Economy ──────────────────────────────────────────────────────────────────

pub const INITIAL_CURRENCY: u32 = 100;
pub const KILL_REWARD: u32 = 10;
pub const UPGRADE_COST: u32 = 50;

// ── HUD hot spots ────────────────────────────────────────────────────────────

/// Clicking here toggles the background music.
pub const MUSIC_TOGGLE: Rect = Rect { x: 700, y: 20, w: 60, h: 60 };
/// Clicking here toggles sound effects.
pub const SOUND_TOGGLE: Rect = Rect { x: 700, y: 80, w: 60, h: 60 };

// ── Rules ────────────────────────────────────────────────────────────────────

/// How many health or currency changes one collision step may make per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tally {
    /// Every consumed sprite counts.
    #[default]
    PerHit,
    /// A step counts at most once per frame, however many sprites it consumed.
    PerFrame,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    pub tally: Tally,
    /// Only pick up power-ups in frames where an enemy bullet also hit the player.
    pub coupled_power_ups: bool,
}

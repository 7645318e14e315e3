//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the frame's timestamp and, where needed, an RNG handle)
//! and returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG; sounds are only requested, through `GameState::sounds`.

use rand::Rng;

use crate::arena::Arena;
use crate::config::{
    Rules, Tally, BULLET_COOLDOWN_MS, BULLET_SPEED, ENEMY_BULLET_SPEED, ENEMY_SHOOT_DELAY_MS,
    ENEMY_SPEED, INITIAL_CURRENCY, KILL_REWARD, PLAYER_HEALTH, PLAYER_SPEED, PLAYER_START,
    POWER_UP_COOLDOWN_MS, POWER_UP_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_MARGIN, SPAWN_Y,
    WAVE_SIZE,
};
use crate::entities::{
    Controls, Entity, EntityId, GameState, GameStatus, Player, Role, SoundCue, SpriteSizes,
};
use crate::geometry::{Rect, Size};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: the player at its start position and an
/// empty playfield.
pub fn init_state(sizes: SpriteSizes, rules: Rules) -> GameState {
    GameState {
        player: Player {
            rect: Rect::from_center(sizes.player, PLAYER_START),
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            last_shot_ms: 0,
        },
        arena: Arena::new(),
        currency: INITIAL_CURRENCY,
        last_power_up_ms: 0,
        status: GameStatus::Playing,
        frame: 0,
        sizes,
        rules,
        sounds: Vec::new(),
    }
}

/// A box centred on a random column just above the top edge.
fn drop_zone(size: Size, rng: &mut impl Rng) -> Rect {
    let x = rng.gen_range(SPAWN_MARGIN..=SCREEN_WIDTH - SPAWN_MARGIN);
    Rect::from_center(size, (x, SPAWN_Y))
}

/// Spawn a fresh wave of enemies along the top edge.
pub fn new_level(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    for _ in 0..WAVE_SIZE {
        let rect = drop_zone(next.sizes.enemy, rng);
        next.arena.spawn(Role::Enemy, rect, ENEMY_SPEED, now_ms);
    }
    log::info!("spawned a wave of {WAVE_SIZE} enemies");
    next
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.player.rect.x = (state.player.rect.x - state.player.speed).max(0);
    next
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut next = state.clone();
    let max_x = SCREEN_WIDTH - state.player.rect.w;
    next.player.rect.x = (state.player.rect.x + state.player.speed).min(max_x);
    next
}

/// Fire a bullet from the player's nose, unless the cooldown is still running.
pub fn player_shoot(state: &GameState, now_ms: u64) -> GameState {
    if now_ms.saturating_sub(state.player.last_shot_ms) <= BULLET_COOLDOWN_MS {
        return state.clone();
    }
    let mut next = state.clone();
    let rect = Rect::from_midbottom(next.sizes.bullet, next.player.rect.midtop());
    next.arena.spawn(Role::Bullet, rect, -BULLET_SPEED, now_ms);
    next.player.last_shot_ms = now_ms;
    next.sounds.push(SoundCue::Shoot);
    next
}

/// Apply every held control for one frame.  Left and right both apply when
/// both are held.
pub fn update_player(state: &GameState, controls: Controls, now_ms: u64) -> GameState {
    let mut next = state.clone();
    if controls.left {
        next = move_player_left(&next);
    }
    if controls.right {
        next = move_player_right(&next);
    }
    if controls.fire {
        next = player_shoot(&next, now_ms);
    }
    next
}

// ── Sprite movement ─────────────────────────────────────────────────────────

/// Past the screen edge in the direction of travel.
fn off_screen(e: &Entity) -> bool {
    if e.vy < 0 {
        e.rect.bottom() < 0
    } else {
        e.rect.top() > SCREEN_HEIGHT
    }
}

/// Move every sprite, drop the ones that left the screen and let enemies whose
/// delay ran out return fire.  Enemy bullets fired this frame do not move yet.
pub fn update_sprites(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    let bullet_size = next.sizes.enemy_bullet;
    let mut shots: Vec<Rect> = Vec::new();

    for e in next.arena.iter_mut() {
        e.rect = e.rect.translated(0, e.vy);
        if e.role == Role::Enemy
            && !off_screen(e)
            && now_ms.saturating_sub(e.last_shot_ms) > ENEMY_SHOOT_DELAY_MS
        {
            shots.push(Rect::from_midtop(bullet_size, e.rect.midbottom()));
            e.last_shot_ms = now_ms;
        }
    }

    next.arena.retain(|e| !off_screen(e));
    for rect in shots {
        next.arena.spawn(Role::EnemyBullet, rect, ENEMY_BULLET_SPEED, now_ms);
    }
    next
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// How many of `hits` count toward health or currency.
fn counted(tally: Tally, hits: usize) -> u32 {
    match tally {
        Tally::PerHit => hits as u32,
        Tally::PerFrame => hits.min(1) as u32,
    }
}

fn reached_game_over(state: &mut GameState) -> bool {
    if state.player.health <= 0 {
        state.status = GameStatus::GameOver;
        log::info!("player destroyed on frame {}", state.frame);
        true
    } else {
        false
    }
}

/// Resolve the frame's overlaps in fixed order: player ↔ enemies, bullets ↔
/// enemies, player ↔ enemy bullets, player ↔ power-ups.  Once health drops to
/// zero the remaining steps are skipped.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    let rules = next.rules;
    let player = next.player.rect;

    // ── 1. Player ↔ enemies ──────────────────────────────────────────────────
    let rammed = next.arena.remove_overlapping(Role::Enemy, &player);
    if rammed > 0 {
        next.player.health -= counted(rules.tally, rammed) as i32;
        log::debug!("rammed by {rammed} enemies, health {}", next.player.health);
        if reached_game_over(&mut next) {
            return next;
        }
        next.sounds.push(SoundCue::Explosion);
    }

    // ── 2. Player bullets ↔ enemies ──────────────────────────────────────────
    let mut spent: Vec<EntityId> = Vec::new();
    let mut killed: Vec<EntityId> = Vec::new();
    for bullet in next.arena.with_role(Role::Bullet) {
        let hits: Vec<EntityId> = next
            .arena
            .with_role(Role::Enemy)
            .filter(|e| !killed.contains(&e.id) && e.rect.overlaps(&bullet.rect))
            .map(|e| e.id)
            .collect();
        if !hits.is_empty() {
            spent.push(bullet.id);
            killed.extend(hits);
        }
    }
    if !killed.is_empty() {
        next.arena
            .retain(|e| !spent.contains(&e.id) && !killed.contains(&e.id));
        next.currency += KILL_REWARD * counted(rules.tally, killed.len());
        log::debug!("{} enemies shot down, currency {}", killed.len(), next.currency);
        next.sounds.push(SoundCue::Explosion);
    }

    // ── 3. Player ↔ enemy bullets ────────────────────────────────────────────
    let struck = next.arena.remove_overlapping(Role::EnemyBullet, &player);
    if struck > 0 {
        next.player.health -= counted(rules.tally, struck) as i32;
        log::debug!("hit by {struck} enemy bullets, health {}", next.player.health);
        if reached_game_over(&mut next) {
            return next;
        }
    }

    // ── 4. Player ↔ power-ups ────────────────────────────────────────────────
    if !rules.coupled_power_ups || struck > 0 {
        let picked = next.arena.remove_overlapping(Role::PowerUp, &player);
        if picked > 0 {
            next.player.health += counted(rules.tally, picked) as i32;
            log::debug!("picked up {picked} power-ups, health {}", next.player.health);
        }
    }

    next
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Drop one power-up once the cooldown has run out.  However long it has been,
/// a single check spawns at most one.
pub fn spawn_power_up(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if now_ms.saturating_sub(state.last_power_up_ms) <= POWER_UP_COOLDOWN_MS {
        return state.clone();
    }
    let mut next = state.clone();
    let rect = drop_zone(next.sizes.power_up, rng);
    next.arena.spawn(Role::PowerUp, rect, POWER_UP_SPEED, now_ms);
    next.last_power_up_ms = now_ms;
    log::debug!("power-up dropped at x={}", rect.center_x());
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame: move, collide, spawn.  Nothing happens
/// unless the game is in play.  All randomness comes through `rng` so callers
/// control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    controls: Controls,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    next.sounds.clear();

    // Sprites move before the player so a bullet fired this frame stays put.
    let next = update_sprites(&next, now_ms);
    let next = update_player(&next, controls, now_ms);
    let next = resolve_collisions(&next);
    if next.status == GameStatus::GameOver {
        return next;
    }
    spawn_power_up(&next, now_ms, rng)
}

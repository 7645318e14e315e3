//! The game manager: owns the state and drives input → update → collide →
//! spawn → draw once per frame, with the shop as a blocking detour.

use std::io;

use rand::Rng;

use crate::assets::Assets;
use crate::backend::{Backend, InputEvent};
use crate::compute;
use crate::config::{Rules, FPS, MUSIC_TOGGLE, SOUND_TOGGLE};
use crate::entities::{GameState, GameStatus, SoundCue};
use crate::error::GameError;
use crate::shop::{self, Upgrade};

/// Key that opens the shop during play.
pub const SHOP_KEY: char = 's';

/// Why the frame loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioSettings {
    pub music_muted: bool,
    pub sound_muted: bool,
}

pub struct Game<B: Backend, R: Rng> {
    backend: B,
    assets: Assets,
    state: GameState,
    rng: R,
    audio: AudioSettings,
    /// Whether background music was loaded and started.
    music: bool,
}

impl<B: Backend, R: Rng> Game<B, R> {
    /// A fresh game with the first wave already on its way down.
    pub fn new(backend: B, assets: Assets, rules: Rules, mut rng: R) -> Self {
        let start = compute::init_state(assets.sizes(), rules);
        let state = compute::new_level(&start, backend.ticks(), &mut rng);
        Self::from_state(backend, assets, state, rng)
    }

    /// Resume from an existing state.
    pub fn from_state(backend: B, assets: Assets, state: GameState, rng: R) -> Self {
        Game {
            backend,
            assets,
            state,
            rng,
            audio: AudioSettings::default(),
            music: false,
        }
    }

    pub fn with_music(mut self, playing: bool) -> Self {
        self.music = playing;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn audio(&self) -> AudioSettings {
        self.audio
    }

    /// Run frames until the player quits or is destroyed.  No frame is
    /// updated or drawn after the one that ended the game.
    pub fn run(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let Some(outcome) = self.handle_events()? {
                return Ok(outcome);
            }

            let now = self.backend.ticks();
            let controls = self.backend.controls();
            self.state = compute::tick(&self.state, controls, now, &mut self.rng);
            self.play_cues();

            if self.state.status == GameStatus::GameOver {
                return Ok(Outcome::GameOver);
            }

            self.draw()?;
            self.backend.cap_frame_rate(FPS);
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    fn handle_events(&mut self) -> Result<Option<Outcome>, GameError> {
        for event in self.backend.poll_events() {
            match event {
                InputEvent::Quit => return Ok(Some(Outcome::Quit)),
                InputEvent::Key(SHOP_KEY) => {
                    if let Some(outcome) = self.open_shop()? {
                        return Ok(Some(outcome));
                    }
                }
                InputEvent::Key(_) => {}
                InputEvent::MouseDown { x, y } => self.click((x, y)),
            }
        }
        Ok(None)
    }

    fn click(&mut self, point: (i32, i32)) {
        if MUSIC_TOGGLE.contains_inclusive(point) {
            self.audio.music_muted = !self.audio.music_muted;
            if self.audio.music_muted {
                self.backend.pause_music();
            } else {
                self.backend.unpause_music();
            }
            log::info!("music muted: {}", self.audio.music_muted);
        } else if SOUND_TOGGLE.contains_inclusive(point) {
            self.audio.sound_muted = !self.audio.sound_muted;
            log::info!("sound muted: {}", self.audio.sound_muted);
        }
    }

    // ── Shop ─────────────────────────────────────────────────────────────────

    /// Block in the shop until it is closed.  `Some` means the player quit
    /// from inside it.
    fn open_shop(&mut self) -> Result<Option<Outcome>, GameError> {
        self.state.status = GameStatus::ShopOpen;
        log::info!("shop opened with {} currency", self.state.currency);

        let mut notice: Option<String> = None;
        loop {
            self.draw_shop(notice.as_deref())?;
            match self.backend.wait_event() {
                InputEvent::Quit => return Ok(Some(Outcome::Quit)),
                InputEvent::Key(shop::CLOSE_KEY) => break,
                InputEvent::Key(key) => {
                    let Some(upgrade) = Upgrade::from_key(key) else {
                        continue;
                    };
                    match shop::purchase(&self.state, upgrade) {
                        Ok(next) => {
                            self.state = next;
                            notice = Some(format!("Bought {upgrade}"));
                        }
                        Err(e) => {
                            log::info!("purchase rejected: {e}");
                            notice = Some(e.to_string());
                        }
                    }
                }
                InputEvent::MouseDown { .. } => {}
            }
        }

        self.state.status = GameStatus::Playing;
        log::info!("shop closed");
        Ok(None)
    }

    // ── Output ───────────────────────────────────────────────────────────────

    fn play_cues(&mut self) {
        if self.audio.sound_muted {
            return;
        }
        for cue in &self.state.sounds {
            let sound = match cue {
                SoundCue::Shoot => self.assets.shoot.as_ref(),
                SoundCue::Explosion => self.assets.explosion.as_ref(),
            };
            if let Some(sound) = sound {
                self.backend.play_sound(sound);
            }
        }
    }

    fn draw_scene(&mut self) -> io::Result<()> {
        let out = &mut self.backend;
        let assets = &self.assets;
        let state = &self.state;

        out.draw(&assets.background, 0, 0)?;
        out.draw(&assets.player, state.player.rect.x, state.player.rect.y)?;
        for e in state.arena.iter() {
            out.draw(assets.image_for(e.role), e.rect.x, e.rect.y)?;
        }

        out.draw_text(&format!("Health: {}", state.player.health), 10, 10)?;
        out.draw_text(&format!("Currency: {}", state.currency), 10, 50)?;

        out.draw(&assets.mute_music, MUSIC_TOGGLE.x, MUSIC_TOGGLE.y)?;
        if self.audio.music_muted {
            out.draw_text("muted", MUSIC_TOGGLE.x, MUSIC_TOGGLE.y + assets.mute_music.size.h)?;
        } else if self.music {
            out.draw_text("♪", MUSIC_TOGGLE.right() + 10, MUSIC_TOGGLE.y)?;
        }
        out.draw(&assets.mute_sound, SOUND_TOGGLE.x, SOUND_TOGGLE.y)?;
        if self.audio.sound_muted {
            out.draw_text("muted", SOUND_TOGGLE.x, SOUND_TOGGLE.y + assets.mute_sound.size.h)?;
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        self.draw_scene()?;
        self.backend.present()
    }

    fn draw_shop(&mut self, notice: Option<&str>) -> io::Result<()> {
        self.draw_scene()?;

        let mut lines = vec![
            "======== SHOP ========".to_string(),
            format!("Currency: {}", self.state.currency),
            String::new(),
        ];
        for upgrade in Upgrade::ALL {
            lines.push(format!("[{}] {:<14}{:>4}", upgrade.key(), upgrade, upgrade.cost()));
        }
        lines.push(format!("[{}] back to the fight", shop::CLOSE_KEY.to_ascii_uppercase()));
        if let Some(notice) = notice {
            lines.push(String::new());
            lines.push(notice.to_string());
        }

        let (x, mut y) = (280, 180);
        for line in &lines {
            self.backend.draw_text(line, x, y)?;
            y += 40;
        }
        self.backend.present()
    }
}

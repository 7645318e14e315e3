#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use invader_shop::assets::{Assets, Image, Sound};
use invader_shop::backend::{Backend, InputEvent};
use invader_shop::compute::init_state;
use invader_shop::config::Rules;
use invader_shop::entities::{Controls, GameState, SpriteSizes};
use invader_shop::error::AssetError;
use invader_shop::geometry::Size;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn sizes() -> SpriteSizes {
    SpriteSizes {
        player: Size::new(50, 40),
        bullet: Size::new(10, 20),
        enemy: Size::new(50, 40),
        enemy_bullet: Size::new(10, 20),
        power_up: Size::new(30, 20),
    }
}

/// Player centred at (400, 550): rect (375, 530, 50, 40).
pub fn make_state() -> GameState {
    init_state(sizes(), Rules::default())
}

pub fn make_state_with(rules: Rules) -> GameState {
    init_state(sizes(), rules)
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn sprite(name: &str, text: &str) -> Image {
    Image::parse(name, text).expect("test sprite has cells")
}

/// In-memory assets whose sizes match `sizes()`.
pub fn test_assets() -> Assets {
    Assets {
        player: sprite("player", "  A\n/###\\"),
        bullet: sprite("bullet", "|"),
        enemy: sprite("enemy1", "\\vVv/\n \\_/"),
        enemy_bullet: sprite("enemy_bullet", "v"),
        background: sprite("background", ". *"),
        power_up: sprite("powerup", "<+>"),
        mute_music: sprite("mute_music", "+----+\n|MUS |"),
        mute_sound: sprite("mute_sound", "+----+\n|SFX!|"),
        shoot: Some(Sound {
            name: "shoot".into(),
            bells: 1,
        }),
        explosion: Some(Sound {
            name: "explosion".into(),
            bells: 2,
        }),
    }
}

/// A backend driven by a script: one event batch per frame, a queue of events
/// for blocking reads, and a clock that advances by `frame_ms` per frame.
/// When the script runs out it reports `Quit`.
#[derive(Default)]
pub struct ScriptedBackend {
    pub now: u64,
    pub frame_ms: u64,
    pub frames: VecDeque<Vec<InputEvent>>,
    pub waits: VecDeque<InputEvent>,
    pub controls: Controls,
    pub played: Vec<String>,
    pub texts: Vec<String>,
    pub presents: usize,
    pub music_playing: bool,
    pub music_paused: bool,
}

impl ScriptedBackend {
    pub fn new(now: u64) -> Self {
        ScriptedBackend {
            now,
            frame_ms: 16,
            ..Default::default()
        }
    }

    pub fn frames(mut self, frames: Vec<Vec<InputEvent>>) -> Self {
        self.frames = frames.into();
        self
    }

    pub fn waits(mut self, waits: Vec<InputEvent>) -> Self {
        self.waits = waits.into();
        self
    }

    pub fn holding(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }
}

impl Backend for ScriptedBackend {
    fn play_sound(&mut self, sound: &Sound) {
        self.played.push(sound.name.clone());
    }

    fn play_music(&mut self, path: &Path) -> Result<(), AssetError> {
        self.load_sound(path)?;
        self.music_playing = true;
        Ok(())
    }

    fn pause_music(&mut self) {
        self.music_paused = true;
    }

    fn unpause_music(&mut self) {
        self.music_paused = false;
    }

    fn ticks(&self) -> u64 {
        self.now
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Quit])
    }

    fn wait_event(&mut self) -> InputEvent {
        self.waits.pop_front().unwrap_or(InputEvent::Quit)
    }

    fn controls(&self) -> Controls {
        self.controls
    }

    fn draw(&mut self, _image: &Image, _x: i32, _y: i32) -> io::Result<()> {
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32) -> io::Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }

    fn cap_frame_rate(&mut self, _fps: u32) {
        self.now += self.frame_ms;
    }
}

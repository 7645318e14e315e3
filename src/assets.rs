//! Sprite and sound assets.
//!
//! Sprites are plain-text files: each line is one row of character cells and
//! the bounding box follows from the widest line and the line count.  Sound
//! cues hold a single bell count (1–9).  A missing or broken image stops the
//! game; a missing or broken sound is only logged.

use std::fs;
use std::path::Path;

use crate::backend::Backend;
use crate::config::{CELL_HEIGHT, CELL_WIDTH};
use crate::entities::{Role, SpriteSizes};
use crate::error::AssetError;
use crate::geometry::Size;

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// File stem; the terminal picks colours by it.
    pub name: String,
    pub rows: Vec<String>,
    /// World-unit bounding box.
    pub size: Size,
}

impl Image {
    pub fn read(path: &Path) -> Result<Image, AssetError> {
        let text = read_text(path)?;
        Image::parse(stem(path), &text).ok_or_else(|| AssetError::Empty {
            path: path.to_path_buf(),
        })
    }

    /// `None` when the text has no visible cells.
    pub fn parse(name: impl Into<String>, text: &str) -> Option<Image> {
        let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if cols == 0 {
            return None;
        }
        let size = Size::new(cols as i32 * CELL_WIDTH, rows.len() as i32 * CELL_HEIGHT);
        Some(Image {
            name: name.into(),
            rows,
            size,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sound {
    pub name: String,
    pub bells: u8,
}

impl Sound {
    pub fn read(path: &Path) -> Result<Sound, AssetError> {
        let text = read_text(path)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }
        match trimmed.parse::<u8>() {
            Ok(bells @ 1..=9) => Ok(Sound {
                name: stem(path),
                bells,
            }),
            _ => Err(AssetError::Malformed {
                path: path.to_path_buf(),
                reason: format!("expected a bell count from 1 to 9, found {trimmed:?}"),
            }),
        }
    }
}

fn read_text(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Asset set ─────────────────────────────────────────────────────────────────

/// Every sprite and sound the game uses, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Image,
    pub bullet: Image,
    pub enemy: Image,
    pub enemy_bullet: Image,
    pub background: Image,
    pub power_up: Image,
    pub mute_music: Image,
    pub mute_sound: Image,
    pub shoot: Option<Sound>,
    pub explosion: Option<Sound>,
}

impl Assets {
    pub fn load<B: Backend>(backend: &mut B, dir: &Path) -> Result<Assets, AssetError> {
        let mut image = |file: &str| {
            backend.load_image(&dir.join(file)).map_err(|e| {
                log::error!("Error loading asset {file}: {e}");
                e
            })
        };
        let player = image("player.txt")?;
        let bullet = image("bullet.txt")?;
        let enemy = image("enemy1.txt")?;
        let enemy_bullet = image("enemy_bullet.txt")?;
        let background = image("background.txt")?;
        let power_up = image("powerup.txt")?;
        let mute_music = image("mute_music.txt")?;
        let mute_sound = image("mute_sound.txt")?;

        let mut sound = |file: &str| match backend.load_sound(&dir.join(file)) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("Error loading sound {file}: {e}");
                None
            }
        };
        let shoot = sound("shoot.cue");
        let explosion = sound("explosion.cue");

        log::debug!("assets loaded from {}", dir.display());
        Ok(Assets {
            player,
            bullet,
            enemy,
            enemy_bullet,
            background,
            power_up,
            mute_music,
            mute_sound,
            shoot,
            explosion,
        })
    }

    pub fn sizes(&self) -> SpriteSizes {
        SpriteSizes {
            player: self.player.size,
            bullet: self.bullet.size,
            enemy: self.enemy.size,
            enemy_bullet: self.enemy_bullet.size,
            power_up: self.power_up.size,
        }
    }

    pub fn image_for(&self, role: Role) -> &Image {
        match role {
            Role::Bullet => &self.bullet,
            Role::Enemy => &self.enemy,
            Role::EnemyBullet => &self.enemy_bullet,
            Role::PowerUp => &self.power_up,
        }
    }
}

/// Start the looping background track; returns whether it is playing.
pub fn start_music<B: Backend>(backend: &mut B, dir: &Path) -> bool {
    match backend.play_music(&dir.join("background.cue")) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Error loading background music: {e}");
            false
        }
    }
}

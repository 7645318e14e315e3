mod common;

use std::fs;
use std::path::{Path, PathBuf};

use invader_shop::assets::{self, Assets, Image, Sound};
use invader_shop::entities::Role;
use invader_shop::error::AssetError;
use invader_shop::geometry::Size;

use common::ScriptedBackend;

fn shipped_assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// A copy of the shipped assets with `skip` left out.
fn assets_without(skip: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(shipped_assets()).unwrap() {
        let path = entry.unwrap().path();
        if path.file_name().unwrap() != skip {
            fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
        }
    }
    dir
}

#[test]
fn sprite_size_follows_its_text() {
    let img = Image::parse("enemy1", "\\vVv/\n \\_/\n\n").unwrap();
    assert_eq!(img.rows.len(), 2);
    assert_eq!(img.size, Size::new(50, 40));
    assert_eq!(img.name, "enemy1");
}

#[test]
fn blank_sprite_is_rejected() {
    assert!(Image::parse("x", "").is_none());
    assert!(Image::parse("x", "   \n  \n").is_none());
}

#[test]
fn shipped_assets_load() {
    let mut backend = ScriptedBackend::new(0);
    let assets = Assets::load(&mut backend, &shipped_assets()).unwrap();
    assert!(assets.shoot.is_some());
    assert!(assets.explosion.is_some());
    assert_eq!(assets.image_for(Role::Enemy).name, "enemy1");
    assert_eq!(assets.sizes().player, assets.player.size);
    assert_eq!(assets.mute_music.size, Size::new(60, 40));
    assert!(assets::start_music(&mut backend, &shipped_assets()));
    assert!(backend.music_playing);
}

#[test]
fn missing_image_is_fatal() {
    let dir = assets_without("enemy1.txt");
    let err = Assets::load(&mut ScriptedBackend::new(0), dir.path()).unwrap_err();
    match err {
        AssetError::Io { path, .. } => assert!(path.ends_with("enemy1.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_sound_is_not_fatal() {
    let dir = assets_without("shoot.cue");
    let assets = Assets::load(&mut ScriptedBackend::new(0), dir.path()).unwrap();
    assert!(assets.shoot.is_none());
    assert!(assets.explosion.is_some());
}

#[test]
fn missing_music_is_not_fatal() {
    let dir = assets_without("background.cue");
    let mut backend = ScriptedBackend::new(0);
    assert!(!assets::start_music(&mut backend, dir.path()));
    assert!(!backend.music_playing);
}

#[test]
fn corrupt_cue_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoot.cue");
    fs::write(&path, "loud").unwrap();
    assert!(matches!(
        Sound::read(&path),
        Err(AssetError::Malformed { .. })
    ));
    fs::write(&path, "\n").unwrap();
    assert!(matches!(Sound::read(&path), Err(AssetError::Empty { .. })));
    fs::write(&path, "3\n").unwrap();
    assert_eq!(Sound::read(&path).unwrap().bells, 3);
}

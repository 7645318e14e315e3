//! The seam between the game and whatever draws, plays and reads input.

use std::io;
use std::path::Path;

use crate::assets::{Image, Sound};
use crate::entities::Controls;
use crate::error::AssetError;

/// A discrete input event.  Held keys are sampled separately via
/// [`Backend::controls`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed, Ctrl-C, or the input source went away.
    Quit,
    /// A character key was pressed.
    Key(char),
    /// A mouse button went down at a point in world units.
    MouseDown { x: i32, y: i32 },
}

pub trait Backend {
    fn load_image(&mut self, path: &Path) -> Result<Image, AssetError> {
        Image::read(path)
    }

    fn load_sound(&mut self, path: &Path) -> Result<Sound, AssetError> {
        Sound::read(path)
    }

    fn play_sound(&mut self, sound: &Sound);

    /// Load and start looping background music.
    fn play_music(&mut self, path: &Path) -> Result<(), AssetError>;
    fn pause_music(&mut self);
    fn unpause_music(&mut self);

    /// Milliseconds since the backend started.
    fn ticks(&self) -> u64;

    /// Drain pending events without blocking.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Block until the next event.
    fn wait_event(&mut self) -> InputEvent;

    fn controls(&self) -> Controls;

    /// Blit `image` with its top-left corner at world `(x, y)`.
    fn draw(&mut self, image: &Image, x: i32, y: i32) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;

    /// Sleep out the rest of the frame.
    fn cap_frame_rate(&mut self, fps: u32);
}

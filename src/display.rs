//! Terminal backend — all terminal I/O lives here.
//!
//! World coordinates are mapped onto character cells (`CELL_WIDTH` ×
//! `CELL_HEIGHT` world units per cell).  Sprites are drawn cell by cell with
//! blanks left transparent, sounds become terminal bells, and background
//! music is tracked as a playing/paused flag.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use invader_shop::assets::{Image, Sound};
use invader_shop::backend::{Backend, InputEvent};
use invader_shop::config::{CELL_HEIGHT, CELL_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use invader_shop::entities::Controls;
use invader_shop::error::AssetError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_POWER_UP: Color = Color::Yellow;
const C_ICON: Color = Color::DarkGrey;
const C_TEXT: Color = Color::White;

fn color_for(image: &Image) -> Color {
    match image.name.as_str() {
        "background" => C_BACKGROUND,
        "player" => C_PLAYER,
        "enemy1" => C_ENEMY,
        "bullet" => C_BULLET_PLAYER,
        "enemy_bullet" => C_BULLET_ENEMY,
        "powerup" => C_POWER_UP,
        "mute_music" | "mute_sound" => C_ICON,
        _ => C_TEXT,
    }
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Music {
    Silent,
    Playing,
    Paused,
}

pub struct TerminalBackend<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    started: Instant,
    frame_start: Instant,
    /// Set once the current frame has been cleared.
    frame_open: bool,
    cols: u16,
    rows: u16,
    music: Music,
    bells: u32,
}

impl<W: Write> TerminalBackend<W> {
    pub fn new(out: W, rx: mpsc::Receiver<Event>) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let (need_cols, need_rows) = (SCREEN_WIDTH / CELL_WIDTH, SCREEN_HEIGHT / CELL_HEIGHT);
        if i32::from(cols) < need_cols || i32::from(rows) < need_rows {
            log::warn!(
                "terminal is {cols}x{rows}, the playfield needs {need_cols}x{need_rows}; edges will be clipped"
            );
        }
        let now = Instant::now();
        Ok(TerminalBackend {
            out,
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            started: now,
            frame_start: now,
            frame_open: false,
            cols,
            rows,
            music: Music::Silent,
            bells: 0,
        })
    }

    /// Track held keys and turn one terminal event into a game event.
    ///
    /// Works on two classes of terminal:
    /// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
    ///   `Press` / `Repeat` / `Release` events → keys are removed on release.
    /// * **Classic terminals**: only `Press` events (OS key-repeat shows as
    ///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames
    ///   of silence.
    fn translate(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    match code {
                        KeyCode::Esc => Some(InputEvent::Quit),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(InputEvent::Quit)
                        }
                        KeyCode::Char(c) => Some(InputEvent::Key(c.to_ascii_lowercase())),
                        _ => None,
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                    None
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                    None
                }
            },
            // Report the centre of the clicked cell.
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => Some(InputEvent::MouseDown {
                x: i32::from(column) * CELL_WIDTH + CELL_WIDTH / 2,
                y: i32::from(row) * CELL_HEIGHT + CELL_HEIGHT / 2,
            }),
            Event::Resize(cols, rows) => {
                self.cols = cols;
                self.rows = rows;
                None
            }
            _ => None,
        }
    }

    /// Clear the screen before the first draw of a frame.
    fn open_frame(&mut self) -> io::Result<()> {
        if !self.frame_open {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.frame_open = true;
        }
        Ok(())
    }

    /// Cell under a world point, or `None` when it falls off the terminal.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let col = x.div_euclid(CELL_WIDTH);
        let row = y.div_euclid(CELL_HEIGHT);
        let col = u16::try_from(col).ok().filter(|&c| c < self.cols)?;
        let row = u16::try_from(row).ok().filter(|&r| r < self.rows)?;
        Some((col, row))
    }
}

impl<W: Write> Backend for TerminalBackend<W> {
    fn play_sound(&mut self, sound: &Sound) {
        self.bells += u32::from(sound.bells);
    }

    fn play_music(&mut self, path: &Path) -> Result<(), AssetError> {
        let track = self.load_sound(path)?;
        log::debug!("looping background track {}", track.name);
        self.music = Music::Playing;
        Ok(())
    }

    fn pause_music(&mut self) {
        if self.music == Music::Playing {
            self.music = Music::Paused;
        }
    }

    fn unpause_music(&mut self) {
        if self.music == Music::Paused {
            self.music = Music::Playing;
        }
    }

    fn ticks(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.extend(self.translate(event)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        events
    }

    fn wait_event(&mut self) -> InputEvent {
        loop {
            match self.rx.recv() {
                Ok(event) => {
                    if let Some(event) = self.translate(event) {
                        return event;
                    }
                }
                Err(_) => return InputEvent::Quit,
            }
        }
    }

    fn controls(&self) -> Controls {
        let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(&self.key_frame, k, self.frame));
        Controls {
            left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            fire: held(&[KeyCode::Char(' ')]),
        }
    }

    fn draw(&mut self, image: &Image, x: i32, y: i32) -> io::Result<()> {
        self.open_frame()?;
        self.out.queue(style::SetForegroundColor(color_for(image)))?;
        for (r, line) in image.rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let px = x + c as i32 * CELL_WIDTH;
                let py = y + r as i32 * CELL_HEIGHT;
                if let Some((col, row)) = self.cell(px, py) {
                    self.out.queue(cursor::MoveTo(col, row))?;
                    self.out.queue(Print(ch))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> io::Result<()> {
        self.open_frame()?;
        if let Some((col, row)) = self.cell(x, y) {
            let room = usize::from(self.cols - col);
            let clipped: String = text.chars().take(room).collect();
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(C_TEXT))?;
            self.out.queue(Print(clipped))?;
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        for _ in 0..std::mem::take(&mut self.bells) {
            self.out.queue(Print('\x07'))?;
        }
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        self.frame_open = false;
        Ok(())
    }

    fn cap_frame_rate(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.frame_start = Instant::now();
        self.frame += 1;
    }
}
